//! YAML / Compose Translator.
//!
//! Wraps the external line-tracked YAML DOM (`marked_yaml`) into a uniform
//! `YAMLNode` tree, then layers a `ComposeGraph` query surface for the
//! docker-compose-specific security checks over it.

use crate::shared::{hash_id, Graph, LanguageFlag, Node as IrNode, NodeDetails, NodeKind, SourceRange};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum YamlKind {
    Scalar,
    Mapping,
    Sequence,
}

/// A uniform tree over the external YAML DOM, line numbers preserved
/// per node.
#[derive(Debug, Clone)]
pub struct YamlNode {
    pub kind: YamlKind,
    pub value: Option<String>,
    pub children: HashMap<String, YamlNode>,
    pub line_number: u32,
}

impl YamlNode {
    fn scalar(value: String, line_number: u32) -> Self {
        Self {
            kind: YamlKind::Scalar,
            value: Some(value),
            children: HashMap::new(),
            line_number,
        }
    }

    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        self.children.get(key)
    }

    pub fn as_scalar_str(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar_str()? {
            "true" | "True" | "TRUE" => Some(true),
            "false" | "False" | "FALSE" => Some(false),
            _ => None,
        }
    }

    pub fn sequence_items(&self) -> Vec<&YamlNode> {
        let mut indices: Vec<usize> = self
            .children
            .keys()
            .filter_map(|k| k.parse::<usize>().ok())
            .collect();
        indices.sort_unstable();
        indices
            .into_iter()
            .filter_map(|i| self.children.get(&i.to_string()))
            .collect()
    }
}

pub struct YamlGraph {
    pub root: YamlNode,
    pub file_path: std::path::PathBuf,
}

fn convert(node: &marked_yaml::Node) -> YamlNode {
    let line_number = node
        .span()
        .start()
        .map(|m| m.line() as u32 + 1)
        .unwrap_or(1);

    if let Some(mapping) = node.as_mapping() {
        let mut children = HashMap::new();
        for (key, value) in mapping.iter() {
            children.insert(key.as_str().to_string(), convert(value));
        }
        return YamlNode {
            kind: YamlKind::Mapping,
            value: None,
            children,
            line_number,
        };
    }
    if let Some(sequence) = node.as_sequence() {
        let mut children = HashMap::new();
        for (index, item) in sequence.iter().enumerate() {
            children.insert(index.to_string(), convert(item));
        }
        return YamlNode {
            kind: YamlKind::Sequence,
            value: None,
            children,
            line_number,
        };
    }
    let text = node
        .as_scalar()
        .map(|s| s.as_str().to_string())
        .unwrap_or_default();
    YamlNode::scalar(text, line_number)
}

pub fn parse_yaml_file(source: &str) -> Option<YamlNode> {
    let parsed = marked_yaml::parse_yaml(0, source).ok()?;
    Some(convert(&parsed))
}

/// Indexes `services`/`volumes`/`networks` from a parsed compose document
/// and exposes the security-relevant query surface.
pub struct ComposeGraph {
    pub services: HashMap<String, YamlNode>,
    pub volumes: HashMap<String, YamlNode>,
    pub networks: HashMap<String, YamlNode>,
}

impl ComposeGraph {
    pub fn from_root(root: &YamlNode) -> Self {
        let collect = |key: &str| -> HashMap<String, YamlNode> {
            root.get(key)
                .map(|section| section.children.clone())
                .unwrap_or_default()
        };
        Self {
            services: collect("services"),
            volumes: collect("volumes"),
            networks: collect("networks"),
        }
    }

    /// Strict equality on the child value.
    pub fn service_has(&self, name: &str, key: &str, value: &str) -> bool {
        self.services
            .get(name)
            .and_then(|s| s.get(key))
            .and_then(|v| v.as_scalar_str())
            .map(|v| v == value)
            .unwrap_or(false)
    }

    pub fn service_has_key(&self, name: &str, key: &str) -> bool {
        self.services
            .get(name)
            .map(|s| s.get(key).is_some())
            .unwrap_or(false)
    }

    pub fn service_get(&self, name: &str, key: &str) -> Option<&YamlNode> {
        self.services.get(name)?.get(key)
    }

    /// Property's own line, or the service's line if the property is
    /// absent, or `1` if the service itself is absent.
    pub fn service_get_line_number(&self, name: &str, key: &str) -> u32 {
        let Some(service) = self.services.get(name) else {
            return 1;
        };
        service
            .get(key)
            .map(|v| v.line_number)
            .unwrap_or(service.line_number)
    }

    pub fn get_privileged_services(&self) -> Vec<String> {
        self.services
            .iter()
            .filter(|(_, s)| {
                s.get("privileged")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Any volume string contains `/var/run/docker.sock` OR
    /// `/run/docker.sock`.
    pub fn services_with_docker_socket(&self) -> Vec<String> {
        self.services
            .iter()
            .filter(|(_, s)| {
                s.get("volumes")
                    .map(|v| {
                        v.sequence_items().iter().any(|item| {
                            item.as_scalar_str()
                                .map(|text| {
                                    text.contains("/var/run/docker.sock")
                                        || text.contains("/run/docker.sock")
                                })
                                .unwrap_or(false)
                        })
                    })
                    .unwrap_or(false)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn service_has_security_opt(&self, name: &str, opt: &str) -> bool {
        self.services
            .get(name)
            .and_then(|s| s.get("security_opt"))
            .map(|v| {
                v.sequence_items()
                    .iter()
                    .any(|item| item.as_scalar_str() == Some(opt))
            })
            .unwrap_or(false)
    }

    pub fn service_has_capability(&self, name: &str, cap: &str, list: &str) -> bool {
        self.services
            .get(name)
            .and_then(|s| s.get(list))
            .map(|v| {
                v.sequence_items()
                    .iter()
                    .any(|item| item.as_scalar_str() == Some(cap))
            })
            .unwrap_or(false)
    }

    pub fn services_with_host_network(&self) -> Vec<String> {
        self.services
            .iter()
            .filter(|(name, _)| self.service_has(name, "network_mode", "host"))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// `ports` entry of the form `"A:B[/proto]"` or bare `"N"`; split on
    /// `/` then `:`, numeric match on either side.
    pub fn service_exposes_port(&self, name: &str, port: u32) -> bool {
        let Some(ports) = self.services.get(name).and_then(|s| s.get("ports")) else {
            return false;
        };
        ports.sequence_items().iter().any(|item| {
            let Some(text) = item.as_scalar_str() else {
                return false;
            };
            let without_proto = text.split('/').next().unwrap_or(text);
            without_proto
                .split(':')
                .any(|side| side.parse::<u32>().ok() == Some(port))
        })
    }

    /// Supports both `environment: [VAR=...]` list and
    /// `environment: { VAR: ... }` map forms.
    pub fn service_has_env_var(&self, name: &str, var: &str) -> bool {
        let Some(env) = self.services.get(name).and_then(|s| s.get("environment")) else {
            return false;
        };
        match env.kind {
            YamlKind::Mapping => env.children.contains_key(var),
            YamlKind::Sequence => env.sequence_items().iter().any(|item| {
                item.as_scalar_str()
                    .map(|text| text == var || text.starts_with(&format!("{}=", var)))
                    .unwrap_or(false)
            }),
            _ => false,
        }
    }

    /// Services that either omit `read_only` or set it to non-true.
    pub fn services_without_read_only(&self) -> Vec<String> {
        self.services
            .iter()
            .filter(|(_, s)| {
                s.get("read_only")
                    .and_then(|v| v.as_bool())
                    .map(|b| !b)
                    .unwrap_or(true)
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn flatten_service(&self, name: &str, service: &YamlNode) -> Vec<String> {
        let mut values = Vec::new();
        if let Some(v) = service.get("privileged").and_then(|v| v.as_scalar_str()) {
            values.push(format!("privileged={}", v));
        }
        if let Some(v) = service.get("network_mode").and_then(|v| v.as_scalar_str()) {
            values.push(format!("network_mode={}", v));
        }
        if let Some(v) = service.get("read_only").and_then(|v| v.as_scalar_str()) {
            values.push(format!("read_only={}", v));
        }
        if self.services_with_docker_socket().contains(&name.to_string()) {
            values.push("docker_socket_mounted=true".to_string());
        }
        if let Some(caps) = service.get("cap_add") {
            for item in caps.sequence_items() {
                if let Some(text) = item.as_scalar_str() {
                    values.push(format!("cap_add={}", text));
                }
            }
        }
        values
    }
}

pub fn translate_compose(source: &str, file: &Path) -> Graph {
    let mut graph = Graph::new();
    let Some(root) = parse_yaml_file(source) else {
        return graph;
    };
    let compose = ComposeGraph::from_root(&root);

    for (name, service) in &compose.services {
        let parameter_values = compose.flatten_service(name, service);
        let id = hash_id(&format!(
            "compose_service:{}:{}:{}",
            file.to_string_lossy(),
            name,
            service.line_number
        ));
        let node = IrNode::new(
            id,
            NodeKind::ComposeService,
            name.clone(),
            file.to_path_buf(),
            SourceRange::new(file.to_path_buf(), 0, source.len().max(1) as u32),
            service.line_number,
            LanguageFlag::Compose,
        )
        .with_details(NodeDetails::Container(parameter_values));
        graph.add_node(node);
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn sample() -> &'static str {
        r#"
services:
  web:
    image: nginx
    privileged: true
    network_mode: host
    ports:
      - "8080:80"
    volumes:
      - /var/run/docker.sock:/var/run/docker.sock
    environment:
      - FOO=bar
  db:
    image: postgres
    read_only: true
    environment:
      FOO: bar
"#
    }

    #[test]
    fn detects_privileged_and_docker_socket() {
        let root = parse_yaml_file(sample()).expect("parses");
        let compose = ComposeGraph::from_root(&root);
        assert_eq!(compose.get_privileged_services(), vec!["web".to_string()]);
        assert_eq!(
            compose.services_with_docker_socket(),
            vec!["web".to_string()]
        );
        assert!(compose.services_with_host_network().contains(&"web".to_string()));
    }

    #[test]
    fn port_and_env_var_queries() {
        let root = parse_yaml_file(sample()).expect("parses");
        let compose = ComposeGraph::from_root(&root);
        assert!(compose.service_exposes_port("web", 80));
        assert!(compose.service_exposes_port("web", 8080));
        assert!(!compose.service_exposes_port("web", 443));
        assert!(compose.service_has_env_var("web", "FOO"));
        assert!(compose.service_has_env_var("db", "FOO"));
    }

    #[test]
    fn read_only_defaults_are_respected() {
        let root = parse_yaml_file(sample()).expect("parses");
        let compose = ComposeGraph::from_root(&root);
        let without = compose.services_without_read_only();
        assert!(without.contains(&"web".to_string()));
        assert!(!without.contains(&"db".to_string()));
    }

    #[test]
    fn emits_compose_service_nodes() {
        let graph = translate_compose(sample(), Path::new("docker-compose.yml"));
        assert_eq!(graph.find_by_kind(NodeKind::ComposeService).len(), 2);
    }
}

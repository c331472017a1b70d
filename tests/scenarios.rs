//! End-to-end scenarios across every translator: Java invocation edges,
//! Python nested-function FQNs and transitive enum inheritance, grouped Go
//! type declarations, Compose docker-socket detection, and Dockerfile
//! instruction ordering.

use codegraph_core::translators::compose::{parse_yaml_file, ComposeGraph};
use codegraph_core::{
    translate_dockerfile, translate_go, translate_java, translate_python, NodeDetails, NodeKind,
};
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn java_class_method_invocation_edge() {
    let source = r#"
public class InvocationClass {
  public void caller() { callee(); }
  private void callee() { fmt.Println("Hello, World!"); }
}
"#;
    let graph = translate_java(source, Path::new("InvocationClass.java"));

    let classes = graph.find_by_kind(NodeKind::ClassDeclaration);
    assert!(classes.iter().any(|n| n.name == "InvocationClass"));

    let methods = graph.find_by_kind(NodeKind::MethodDeclaration);
    assert_eq!(methods.len(), 2);

    let invocations = graph.find_by_kind(NodeKind::MethodInvocation);
    assert_eq!(invocations.len(), 2);

    let caller = methods.iter().find(|m| m.name == "caller").unwrap();
    let callee_invocation = invocations.iter().find(|n| n.name == "callee").unwrap();
    assert!(caller
        .outgoing_edges
        .iter()
        .any(|&idx| graph.edges()[idx].to == callee_invocation.id));
}

#[test]
fn python_nested_function_fqn() {
    let source = "\
def parent_a():
    def child(): pass
def parent_b():
    def child(): pass
";
    let graph = translate_python(source, Path::new("m.py"));
    let functions = graph.find_by_kind(NodeKind::FunctionDeclaration);

    let a_child = functions.iter().find(|n| n.name == "parent_a.child").unwrap();
    let b_child = functions.iter().find(|n| n.name == "parent_b.child").unwrap();
    assert_ne!(a_child.id, b_child.id);
}

#[test]
fn python_transitive_enum_inheritance() {
    let source = "\
from enum import Enum
class CustomEnum(Enum): pass
class Operator(CustomEnum):
    ADD = \"add\"
";
    let mut graph = translate_python(source, Path::new("m.py"));
    codegraph_core::translators::resolve_transitive_inheritance(&mut graph);

    let custom_enum = graph.nodes().find(|n| n.name == "CustomEnum").unwrap();
    let operator = graph.nodes().find(|n| n.name == "Operator").unwrap();
    assert_eq!(custom_enum.kind, NodeKind::Enum);
    assert_eq!(operator.kind, NodeKind::Enum);
}

#[test]
fn go_grouped_type_declaration() {
    let source = "package main\ntype ( A int\n B string\n C []byte )\n";
    let graph = translate_go(source, Path::new("m.go"));
    let aliases = graph.find_by_kind(NodeKind::TypeAlias);
    assert_eq!(aliases.len(), 3);
    for expected in ["A", "B", "C"] {
        let node = aliases.iter().find(|n| n.name == expected).unwrap();
        assert_eq!(node.modifier, codegraph_core::Modifier::Public);
    }
}

#[test]
fn compose_docker_socket_detection() {
    let source = "\
services:
  dind:
    image: docker:dind
    volumes: [ /var/run/docker.sock:/var/run/docker.sock ]
  web:
    image: nginx
    volumes: [ ./html:/usr/share/nginx/html ]
";
    let root = parse_yaml_file(source).expect("valid yaml");
    let compose = ComposeGraph::from_root(&root);
    assert_eq!(compose.services_with_docker_socket(), vec!["dind".to_string()]);
}

#[test]
fn dockerfile_instruction_count_and_order() {
    let source = "\
FROM ubuntu:22.04
RUN apt-get update
USER appuser
EXPOSE 8080
WORKDIR /app
COPY . /app
ENV DEBUG=true
CMD [\"./start.sh\"]
";
    let graph = translate_dockerfile(source, Path::new("Dockerfile"));
    let mut instructions: Vec<_> = graph.find_by_kind(NodeKind::DockerfileInstruction);
    instructions.sort_by_key(|n| n.line_number);
    assert_eq!(instructions.len(), 8);
    let names: Vec<&str> = instructions.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["FROM", "RUN", "USER", "EXPOSE", "WORKDIR", "COPY", "ENV", "CMD"]
    );
    for node in &instructions {
        assert!(matches!(node.details, NodeDetails::Container(_)));
    }
}

//! Dockerfile Translator.
//!
//! The external collaborator (`dockerfile-parser`) parses the file into a
//! sequence of typed instruction records with line numbers; this module
//! flattens each record's salient fields into `parameter_values`.

use crate::shared::{hash_id, Graph, LanguageFlag, Node, NodeDetails, NodeKind, SourceRange};
use dockerfile_parser::{Dockerfile, Instruction};
use std::path::Path;

pub fn translate_dockerfile(source: &str, file: &Path) -> Graph {
    let mut graph = Graph::new();
    let Ok(dockerfile) = Dockerfile::parse(source) else {
        return graph;
    };
    let file_str = file.to_string_lossy().into_owned();

    for instruction in &dockerfile.instructions {
        let (keyword, line, parameter_values) = describe(instruction);
        let id = hash_id(&format!("dockerfile:{}:{}:{}:1", file_str, keyword, line));
        let node = Node::new(
            id,
            NodeKind::DockerfileInstruction,
            keyword,
            file.to_path_buf(),
            SourceRange::new(file.to_path_buf(), 0, source.len().max(1) as u32),
            line,
            LanguageFlag::Docker,
        )
        .with_details(NodeDetails::Container(parameter_values));
        graph.add_node(node);
    }

    graph
}

fn describe(instruction: &Instruction) -> (String, u32, Vec<String>) {
    match instruction {
        Instruction::From(from) => {
            let line = from.span.start.line as u32;
            let mut values = vec![from.image.image.content.to_string()];
            if let Some(tag) = &from.image.tag {
                values.push(tag.content.to_string());
            }
            if let Some(alias) = &from.alias {
                values.push(format!("AS {}", alias.content));
            }
            ("FROM".to_string(), line, values)
        }
        Instruction::Arg(arg) => {
            let line = arg.span.start.line as u32;
            let mut values = vec![arg.name.content.to_string()];
            if let Some(value) = &arg.value {
                values.push(value.content.to_string());
            }
            ("ARG".to_string(), line, values)
        }
        Instruction::Label(label) => {
            let line = label.span.start.line as u32;
            let values = label
                .labels
                .iter()
                .map(|pair| format!("{}={}", pair.key.content, pair.value.content))
                .collect();
            ("LABEL".to_string(), line, values)
        }
        Instruction::Env(env) => {
            let line = env.span.start.line as u32;
            let values = env
                .vars
                .iter()
                .map(|pair| format!("{}={}", pair.key.content, pair.value.content))
                .collect();
            ("ENV".to_string(), line, values)
        }
        Instruction::Run(run) => {
            let line = run.span.start.line as u32;
            (
                "RUN".to_string(),
                line,
                flatten_shell_or_exec(&run.expr),
            )
        }
        Instruction::Misc(generic) => {
            let line = generic.span.start.line as u32;
            let keyword = generic.instruction.content.to_uppercase();
            let raw = generic.arguments.to_string();
            let values = flatten_misc(&keyword, &raw);
            (keyword, line, values)
        }
    }
}

fn flatten_shell_or_exec(expr: &dockerfile_parser::ShellOrExecExpr) -> Vec<String> {
    match expr {
        dockerfile_parser::ShellOrExecExpr::Shell(shell) => vec![shell.to_string()],
        dockerfile_parser::ShellOrExecExpr::Exec(exec) => exec
            .elements
            .iter()
            .map(|e| e.content.to_string())
            .collect(),
    }
}

/// Per-keyword flattening for the instructions the crate exposes only
/// generically: EXPOSE (decimal ports), USER (user/group), COPY/ADD
/// (sources then dest), CMD/ENTRYPOINT (array or raw args), others get their
/// single salient raw field.
fn flatten_misc(keyword: &str, raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    match keyword {
        "EXPOSE" => trimmed.split_whitespace().map(|s| s.to_string()).collect(),
        "USER" => {
            let mut parts = trimmed.splitn(2, ':');
            let user = parts.next().unwrap_or("").to_string();
            let mut out = vec![user];
            if let Some(group) = parts.next() {
                out.push(group.to_string());
            }
            out
        }
        "COPY" | "ADD" => trimmed.split_whitespace().map(|s| s.to_string()).collect(),
        "CMD" | "ENTRYPOINT" => {
            if trimmed.starts_with('[') {
                trimmed
                    .trim_matches(|c| c == '[' || c == ']')
                    .split(',')
                    .map(|s| s.trim().trim_matches('"').to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            } else {
                trimmed.split_whitespace().map(|s| s.to_string()).collect()
            }
        }
        _ => vec![trimmed.to_string()],
    }
}

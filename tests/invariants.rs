//! Property-style checks on graph-wide invariants: deterministic ids,
//! well-formed edges and source ranges, closed visibility/FQN/inheritance
//! domains, and full Dockerfile instruction coverage.

use codegraph_core::{translate_dockerfile, translate_go, translate_java, translate_python};
use codegraph_core::{Modifier, NodeKind};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

const JAVA_SAMPLE: &str = r#"
public class Widget {
  private int count;
  public Widget() { count = 0; }
  public void bump() { count = count + 1; helper(); }
  private void helper() {}
}
"#;

#[test]
fn deterministic_ids_across_runs() {
    let first = translate_java(JAVA_SAMPLE, Path::new("Widget.java"));
    let second = translate_java(JAVA_SAMPLE, Path::new("Widget.java"));

    let mut first_ids: Vec<&str> = first.nodes().map(|n| n.id.as_str()).collect();
    let mut second_ids: Vec<&str> = second.nodes().map(|n| n.id.as_str()).collect();
    first_ids.sort_unstable();
    second_ids.sort_unstable();
    assert_eq!(first_ids, second_ids);
    assert_eq!(first.edge_count(), second.edge_count());
}

#[test]
fn edge_endpoints_resolve() {
    let graph = translate_java(JAVA_SAMPLE, Path::new("Widget.java"));
    for edge in graph.edges() {
        assert!(graph.contains(&edge.from), "missing from endpoint {}", edge.from);
        assert!(graph.contains(&edge.to), "missing to endpoint {}", edge.to);
    }
}

#[test]
fn source_range_well_formed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Widget.java");
    std::fs::write(&path, JAVA_SAMPLE).unwrap();
    let graph = translate_java(JAVA_SAMPLE, &path);
    let file_size = std::fs::metadata(&path).unwrap().len() as u32;
    for node in graph.nodes() {
        assert!(node.source_range.end_byte > node.source_range.start_byte);
        assert!(node.source_range.end_byte <= file_size);
    }
}

#[test]
fn visibility_domain_is_closed() {
    let graph = translate_java(JAVA_SAMPLE, Path::new("Widget.java"));
    for node in graph.nodes() {
        assert!(matches!(
            node.modifier,
            Modifier::None | Modifier::Public | Modifier::Private | Modifier::Protected
        ));
    }
}

#[test]
fn python_nested_function_fqn_contains_dot() {
    let source = "def outer():\n    def inner():\n        def innermost():\n            pass\n";
    let graph = translate_python(source, Path::new("m.py"));
    for node in graph.find_by_kind(NodeKind::FunctionDeclaration) {
        if node.name != "outer" {
            assert!(node.name.contains('.'), "{} missing dot", node.name);
        }
    }
}

#[test]
fn assignment_lhs_filter() {
    let source = "CONFIG['key'] = 1\nsettings.FOO = 2\nplain = 3\n";
    let graph = translate_python(source, Path::new("m.py"));
    for node in graph
        .find_by_kind(NodeKind::ModuleVariable)
        .into_iter()
        .chain(graph.find_by_kind(NodeKind::Constant))
        .chain(graph.find_by_kind(NodeKind::ClassField))
        .chain(graph.find_by_kind(NodeKind::VariableAssignment))
    {
        assert!(!node.name.contains('['));
        assert!(!node.name.contains(']'));
        assert!(!node.name.contains('\''));
        assert!(!node.name.contains('.'));
    }
}

#[test]
fn transitive_inheritance_closure() {
    let source = "\
from enum import Enum
class Base(Enum):
    A = 1
class Middle(Base):
    pass
class Leaf(Middle):
    pass
";
    let mut graph = translate_python(source, Path::new("m.py"));
    codegraph_core::translators::resolve_transitive_inheritance(&mut graph);
    assert_eq!(graph.find_by_kind(NodeKind::ClassDefinition).len(), 0);
}

#[test]
fn dockerfile_instruction_coverage() {
    let source = "FROM alpine\nRUN echo hi\nCMD [\"true\"]\n";
    let dir = tempdir().unwrap();
    let path = dir.path().join("Dockerfile");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(source.as_bytes())
        .unwrap();
    let graph = translate_dockerfile(source, &path);
    assert_eq!(graph.find_by_kind(NodeKind::DockerfileInstruction).len(), 3);
}

#[test]
fn go_keyword_filter_does_not_flag_type_alias_names() {
    let source = "package main\ntype MyInt int\n";
    let graph = translate_go(source, Path::new("m.go"));
    assert_eq!(graph.find_by_kind(NodeKind::TypeAlias).len(), 1);
}

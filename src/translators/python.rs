//! Python Translator.

use crate::parsing::{self, ContextFrame, Language, TranslationContext};
use crate::shared::{
    node_id, CallDetails, ClassDetails, FunctionDetails, Graph, LanguageFlag, Node, NodeDetails,
    NodeKind, Scope, StatementPayload, VariableDetails,
};
use std::path::Path;
use tree_sitter::Node as TsNode;

pub fn translate_python(source: &str, file: &Path) -> Graph {
    let mut graph = Graph::new();
    let Some(tree) = parsing::parse(source, Language::Python) else {
        return graph;
    };
    let mut ctx = TranslationContext::new(source, file, LanguageFlag::Python);
    walk(&tree.root_node(), &mut ctx, &mut graph);
    graph
}

fn walk(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    match node.kind() {
        "function_definition" => extract_function(node, ctx, graph),
        "class_definition" => extract_class(node, ctx, graph),
        "assignment" => extract_assignment(node, ctx, graph),
        "call" => extract_call(node, ctx, graph),
        "return_statement" => extract_simple(node, ctx, graph, NodeKind::ReturnStmt, "return"),
        "break_statement" => extract_simple(node, ctx, graph, NodeKind::BreakStmt, "break"),
        "continue_statement" => {
            extract_simple(node, ctx, graph, NodeKind::ContinueStmt, "continue")
        }
        "assert_statement" => extract_assert(node, ctx, graph),
        "yield" | "yield_expression" => extract_simple(node, ctx, graph, NodeKind::YieldStmt, "yield"),
        _ => recurse_children(node, ctx, graph),
    }
}

fn recurse_children(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(&child, ctx, graph);
    }
}

fn is_function_context(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::FunctionDeclaration
            | NodeKind::Method
            | NodeKind::Property
            | NodeKind::Constructor
            | NodeKind::SpecialMethod
    )
}

fn is_class_like(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ClassDefinition | NodeKind::Interface | NodeKind::Enum | NodeKind::Dataclass
    )
}

/// Decorators preceding `def_node`'s parent `decorated_definition`, stripped
/// of `@` and argument lists.
fn extract_decorators(def_node: &TsNode, ctx: &TranslationContext) -> Vec<String> {
    let Some(parent) = def_node.parent() else {
        return Vec::new();
    };
    if parent.kind() != "decorated_definition" {
        return Vec::new();
    }
    let mut decorators = Vec::new();
    let mut cursor = parent.walk();
    for child in parent.named_children(&mut cursor) {
        if child.kind() != "decorator" {
            continue;
        }
        let text = ctx.node_text(&child);
        let stripped = text.trim_start_matches('@').trim();
        let cut = stripped.split('(').next().unwrap_or(stripped).trim();
        if !cut.is_empty() {
            decorators.push(cut.to_string());
        }
    }
    decorators
}

fn last_component(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn extract_parameters<'a>(
    params_node: &TsNode,
    ctx: &TranslationContext<'a>,
) -> (Vec<String>, Vec<String>) {
    let mut types = Vec::new();
    let mut names = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                let name = ctx.node_text(&child).to_string();
                types.push(name.clone());
                names.push(name);
            }
            "typed_parameter" => {
                let name = child
                    .named_child(0)
                    .map(|n| ctx.node_text(&n).to_string())
                    .unwrap_or_default();
                let ty = child
                    .child_by_field_name("type")
                    .map(|t| ctx.node_text(&t).to_string())
                    .unwrap_or_default();
                types.push(format!("{}: {}", name, ty));
                names.push(name);
            }
            "default_parameter" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| ctx.node_text(&n).to_string())
                    .unwrap_or_default();
                types.push(name.clone());
                names.push(name);
            }
            "typed_default_parameter" => {
                let name = child
                    .child_by_field_name("name")
                    .map(|n| ctx.node_text(&n).to_string())
                    .unwrap_or_default();
                let ty = child
                    .child_by_field_name("type")
                    .map(|t| ctx.node_text(&t).to_string())
                    .unwrap_or_default();
                types.push(format!("{}: {}", name, ty));
                names.push(name);
            }
            _ => {}
        }
    }
    (types, names)
}

fn extract_function(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let base_name = ctx.node_text(&name_node).to_string();

    let mut kind = if base_name == "__init__" {
        NodeKind::Constructor
    } else if base_name.len() >= 5 && base_name.starts_with("__") && base_name.ends_with("__") {
        NodeKind::SpecialMethod
    } else if ctx
        .current_context
        .as_ref()
        .map(|c| is_class_like(c.kind))
        .unwrap_or(false)
    {
        NodeKind::Method
    } else {
        NodeKind::FunctionDeclaration
    };

    let decorators = extract_decorators(node, ctx);
    if decorators.iter().any(|d| d == "property") {
        kind = NodeKind::Property;
    }

    let name = if ctx
        .current_context
        .as_ref()
        .map(|c| is_function_context(c.kind))
        .unwrap_or(false)
    {
        format!("{}.{}", ctx.current_context.as_ref().unwrap().name, base_name)
    } else {
        base_name
    };

    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let return_type = node
        .child_by_field_name("return_type")
        .map(|t| ctx.node_text(&t).to_string());
    let (parameter_types, parameter_names) = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, ctx))
        .unwrap_or_default();

    let id = node_id(kind, &name, &parameter_types, &file, line);
    let func_node = Node::new(
        id.clone(),
        kind,
        name.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Function(FunctionDetails {
        return_type,
        parameter_types,
        parameter_names,
        throws: Vec::new(),
        annotations: decorators,
        javadoc: None,
    }));
    graph.add_node(func_node);

    let old_context = ctx.current_context.take();
    ctx.current_context = Some(ContextFrame { id, kind, name });

    if let Some(body) = node.child_by_field_name("body") {
        recurse_children(&body, ctx, graph);
    }

    ctx.current_context = old_context;
}

fn extract_base_classes<'a>(node: &TsNode, ctx: &TranslationContext<'a>) -> Vec<String> {
    let mut out = Vec::new();
    let Some(superclasses) = node.child_by_field_name("superclasses") else {
        return out;
    };
    let mut cursor = superclasses.walk();
    for child in superclasses.named_children(&mut cursor) {
        if child.kind() == "keyword_argument" {
            continue;
        }
        out.push(ctx.node_text(&child).to_string());
    }
    out
}

fn extract_class(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let base_name = ctx.node_text(&name_node).to_string();
    let base_classes = extract_base_classes(node, ctx);

    let mut kind = if base_classes
        .iter()
        .any(|b| matches!(last_component(b), "Protocol" | "ABC"))
    {
        NodeKind::Interface
    } else if base_classes
        .iter()
        .any(|b| matches!(last_component(b), "Enum" | "IntEnum" | "Flag" | "IntFlag"))
    {
        NodeKind::Enum
    } else {
        NodeKind::ClassDefinition
    };

    let decorators = extract_decorators(node, ctx);
    if decorators.iter().any(|d| last_component(d) == "dataclass") {
        kind = NodeKind::Dataclass;
    }

    let name = if ctx
        .current_context
        .as_ref()
        .map(|c| is_function_context(c.kind))
        .unwrap_or(false)
    {
        format!("{}.{}", ctx.current_context.as_ref().unwrap().name, base_name)
    } else {
        base_name
    };

    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let id = node_id(kind, &name, &[], &file, line);
    let class_node = Node::new(
        id.clone(),
        kind,
        name.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Class(ClassDetails {
        package_name: None,
        super_class: base_classes.first().cloned(),
        interface_list: base_classes,
        annotations: decorators,
        javadoc: None,
    }));
    graph.add_node(class_node);

    let old_context = ctx.current_context.take();
    ctx.current_context = Some(ContextFrame { id, kind, name });

    if let Some(body) = node.child_by_field_name("body") {
        recurse_children(&body, ctx, graph);
    }

    ctx.current_context = old_context;
}

fn constant_name_rule(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let mut has_letter = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if !c.is_uppercase() {
                return false;
            }
            has_letter = true;
        } else if !(c.is_ascii_digit() || c == '_') {
            return false;
        }
    }
    has_letter
}

fn extract_assignment(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(left) = node.child_by_field_name("left") else {
        recurse_children(node, ctx, graph);
        return;
    };
    if left.kind() != "identifier" {
        // Skip `subscript`/`attribute` left-hand sides entirely.
        if let Some(right) = node.child_by_field_name("right") {
            walk(&right, ctx, graph);
        }
        return;
    }
    let name = ctx.node_text(&left).to_string();
    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let value = node
        .child_by_field_name("right")
        .map(|v| ctx.node_text(&v).to_string());
    let data_type = node
        .child_by_field_name("type")
        .map(|t| ctx.node_text(&t).to_string());

    let context_kind = ctx.current_context.as_ref().map(|c| c.kind);
    let (scope, kind) = match context_kind {
        None => (
            Scope::Module,
            if constant_name_rule(&name) {
                NodeKind::Constant
            } else {
                NodeKind::ModuleVariable
            },
        ),
        Some(k) if is_class_like(k) => (
            Scope::Class,
            if constant_name_rule(&name) {
                NodeKind::Constant
            } else {
                NodeKind::ClassField
            },
        ),
        Some(_) => (Scope::Local, NodeKind::VariableAssignment),
    };

    let id = node_id(kind, &name, &[], &file, line);
    let var_node = Node::new(
        id,
        kind,
        name,
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Variable(VariableDetails {
        data_type,
        variable_value: value,
        scope: Some(scope),
    }));
    graph.add_node(var_node);

    if let Some(right) = node.child_by_field_name("right") {
        walk(&right, ctx, graph);
    }
}

fn extract_call(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(func_node) = node.child_by_field_name("function") else {
        recurse_children(node, ctx, graph);
        return;
    };
    let name = ctx.node_text(&func_node).to_string();
    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let mut arguments = Vec::new();
    if let Some(args_node) = node.child_by_field_name("arguments") {
        let mut cursor = args_node.walk();
        for child in args_node.named_children(&mut cursor) {
            arguments.push(ctx.node_text(&child).to_string());
        }
    }

    let id = node_id(NodeKind::Call, &name, &arguments, &file, line);
    let call_node = Node::new(
        id.clone(),
        NodeKind::Call,
        name,
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_is_external(true)
    .with_details(NodeDetails::Call(CallDetails {
        arguments,
        receiver: None,
    }));
    graph.add_node(call_node);

    if let Some(ref from) = ctx.current_context {
        graph.add_edge(&from.id, &id);
    }

    if let Some(args_node) = node.child_by_field_name("arguments") {
        recurse_children(&args_node, ctx, graph);
    }
}

fn extract_simple(
    node: &TsNode,
    ctx: &mut TranslationContext,
    graph: &mut Graph,
    kind: NodeKind,
    label: &str,
) {
    let value = node.named_child(0).map(|n| ctx.node_text(&n).to_string());
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let id = node_id(kind, label, &[], &file, line);
    let details = match kind {
        NodeKind::ReturnStmt => {
            NodeDetails::Statement(StatementPayload::Return { value: value.clone() })
        }
        NodeKind::YieldStmt => {
            NodeDetails::Statement(StatementPayload::Yield { value: value.clone() })
        }
        _ => NodeDetails::None,
    };
    let stmt_node = Node::new(
        id,
        kind,
        label,
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(details);
    graph.add_node(stmt_node);

    if let Some(v) = node.named_child(0) {
        walk(&v, ctx, graph);
    }
}

fn extract_assert(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let condition = node
        .named_child(0)
        .map(|n| ctx.node_text(&n).to_string())
        .unwrap_or_default();
    let message = node.named_child(1).map(|n| ctx.node_text(&n).to_string());
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let id = node_id(NodeKind::AssertStmt, &condition, &[], &file, line);
    let assert_node = Node::new(
        id,
        NodeKind::AssertStmt,
        condition.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Statement(StatementPayload::Assert {
        condition,
        message,
    }));
    graph.add_node(assert_node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn nested_function_gets_dotted_fqn_name() {
        let source = "def outer():\n    def inner():\n        pass\n    return inner\n";
        let graph = translate_python(source, Path::new("m.py"));
        let functions = graph.find_by_kind(NodeKind::FunctionDeclaration);
        assert!(functions.iter().any(|n| n.name == "outer"));
        assert!(functions.iter().any(|n| n.name == "outer.inner"));
    }

    #[test]
    fn init_is_constructor_and_methods_are_classified() {
        let source = "class Foo:\n    def __init__(self):\n        pass\n    def bar(self):\n        pass\n";
        let graph = translate_python(source, Path::new("m.py"));
        assert_eq!(graph.find_by_kind(NodeKind::Constructor).len(), 1);
        let methods = graph.find_by_kind(NodeKind::Method);
        assert_eq!(methods.len(), 1);
        // Dotted naming only applies when the enclosing context is itself
        // function-kind; a class body isn't, so the method keeps its bare name.
        assert_eq!(methods[0].name, "bar");
    }

    #[test]
    fn enum_base_class_is_detected() {
        let source = "from enum import Enum\nclass Color(Enum):\n    RED = 1\n";
        let graph = translate_python(source, Path::new("m.py"));
        assert_eq!(graph.find_by_kind(NodeKind::Enum).len(), 1);
    }

    #[test]
    fn dataclass_decorator_overrides_class_kind() {
        let source = "@dataclass\nclass Point:\n    x: int\n    y: int\n";
        let graph = translate_python(source, Path::new("m.py"));
        assert_eq!(graph.find_by_kind(NodeKind::Dataclass).len(), 1);
        assert_eq!(graph.find_by_kind(NodeKind::ClassDefinition).len(), 0);
    }

    #[test]
    fn property_decorator_overrides_function_kind() {
        let source = "class Foo:\n    @property\n    def bar(self):\n        return 1\n";
        let graph = translate_python(source, Path::new("m.py"));
        assert_eq!(graph.find_by_kind(NodeKind::Property).len(), 1);
    }

    #[test]
    fn subscript_and_attribute_assignment_targets_are_skipped() {
        let source = "CONFIG['key'] = 1\nsettings.FOO = 2\nTOTAL = 3\n";
        let graph = translate_python(source, Path::new("m.py"));
        assert_eq!(graph.find_by_kind(NodeKind::ModuleVariable).len(), 0);
        assert_eq!(graph.find_by_kind(NodeKind::Constant).len(), 1);
        assert_eq!(graph.find_by_kind(NodeKind::Constant)[0].name, "TOTAL");
    }

    #[test]
    fn call_node_is_external_and_edged_from_context() {
        let source = "def outer():\n    helper()\n";
        let graph = translate_python(source, Path::new("m.py"));
        let calls = graph.find_by_kind(NodeKind::Call);
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is_external);
        let outer = &graph.find_by_kind(NodeKind::FunctionDeclaration)[0];
        assert_eq!(outer.outgoing_edges.len(), 1);
    }
}

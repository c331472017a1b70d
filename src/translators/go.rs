//! Go Translator.

use crate::parsing::{self, ContextFrame, Language, TranslationContext};
use crate::shared::{
    node_id, CallDetails, FunctionDetails, Graph, LanguageFlag, Modifier, Node, NodeDetails,
    NodeKind, Scope, StatementPayload, VariableDetails,
};
use std::path::Path;
use tree_sitter::Node as TsNode;

const KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

const PREDECLARED_IDENTIFIERS: &[&str] = &["true", "false", "nil", "iota"];

const PREDECLARED_TYPES: &[&str] = &[
    "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int", "int8",
    "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64",
    "uintptr", "any",
];

const BUILTINS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// Recognizes the 25 keywords, predeclared identifiers/types, and builtins.
/// Used by downstream passes to avoid treating these as user identifiers.
pub fn is_go_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
        || PREDECLARED_IDENTIFIERS.contains(&word)
        || PREDECLARED_TYPES.contains(&word)
        || BUILTINS.contains(&word)
}

pub fn translate_go(source: &str, file: &Path) -> Graph {
    let mut graph = Graph::new();
    let Some(tree) = parsing::parse(source, Language::Go) else {
        return graph;
    };
    let mut ctx = TranslationContext::new(source, file, LanguageFlag::Go);
    walk(&tree.root_node(), &mut ctx, &mut graph);
    graph
}

fn walk(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    match node.kind() {
        "function_declaration" => extract_function(node, ctx, graph),
        "method_declaration" => extract_method(node, ctx, graph),
        "type_declaration" => extract_type_declaration(node, ctx, graph),
        "var_declaration" => extract_grouped_decl(node, ctx, graph, NodeKind::ModuleVariable),
        "const_declaration" => extract_grouped_decl(node, ctx, graph, NodeKind::Constant),
        "short_var_declaration" => extract_short_var(node, ctx, graph),
        "assignment_statement" => extract_assignment_statement(node, ctx, graph),
        "call_expression" => extract_call(node, ctx, graph),
        "defer_statement" => extract_defer_or_go(node, ctx, graph),
        "go_statement" => extract_defer_or_go(node, ctx, graph),
        "return_statement" => extract_return(node, ctx, graph),
        "for_statement" => extract_for(node, ctx, graph),
        "if_statement" => extract_if(node, ctx, graph),
        _ => recurse_children(node, ctx, graph),
    }
}

fn recurse_children(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(&child, ctx, graph);
    }
}

fn strip_pointer(type_text: &str) -> String {
    type_text.trim_start_matches('*').to_string()
}

/// Expands `a, b int` style grouped parameters into `"a: int", "b: int"`,
/// including variadic `...T`.
fn extract_params<'a>(params_node: &TsNode, ctx: &TranslationContext<'a>) -> (Vec<String>, Vec<String>) {
    let mut types = Vec::new();
    let mut names = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.named_children(&mut cursor) {
        if child.kind() != "parameter_declaration" && child.kind() != "variadic_parameter_declaration"
        {
            continue;
        }
        let ty = child
            .child_by_field_name("type")
            .map(|t| ctx.node_text(&t).to_string())
            .unwrap_or_default();
        let ty = if child.kind() == "variadic_parameter_declaration" {
            format!("...{}", ty)
        } else {
            ty
        };
        let mut name_cursor = child.walk();
        let mut field_names: Vec<String> = Vec::new();
        for sub in child.children(&mut name_cursor) {
            if sub.kind() == "identifier" {
                field_names.push(ctx.node_text(&sub).to_string());
            }
        }
        if field_names.is_empty() {
            types.push(ty);
            names.push(String::new());
        } else {
            for name in field_names {
                types.push(format!("{}: {}", name, ty));
                names.push(name);
            }
        }
    }
    (types, names)
}

fn extract_function(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let name = ctx.node_text(&name_node).to_string();
    let kind = if name == "init" {
        NodeKind::InitFunction
    } else {
        NodeKind::FunctionDeclaration
    };
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let modifier = Modifier::from_go_identifier(&name);

    let return_type = node
        .child_by_field_name("result")
        .map(|t| ctx.node_text(&t).to_string());
    let (parameter_types, parameter_names) = node
        .child_by_field_name("parameters")
        .map(|p| extract_params(&p, ctx))
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
    .with_modifier(modifier)
    .with_details(NodeDetails::Function(FunctionDetails {
        return_type,
        parameter_types,
        parameter_names,
        throws: Vec::new(),
        annotations: Vec::new(),
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

fn extract_method(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let method_name = ctx.node_text(&name_node).to_string();

    let receiver_type = node
        .child_by_field_name("receiver")
        .and_then(|receiver| {
            let mut cursor = receiver.walk();
            receiver
                .children(&mut cursor)
                .find(|c| c.kind() == "parameter_declaration")
                .and_then(|p| p.child_by_field_name("type"))
                .map(|t| ctx.node_text(&t).to_string())
        })
        .map(|t| strip_pointer(&t))
        .unwrap_or_default();

    let name = if receiver_type.is_empty() {
        method_name.clone()
    } else {
        format!("{}.{}", receiver_type, method_name)
    };

    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let modifier = Modifier::from_go_identifier(&method_name);

    let return_type = node
        .child_by_field_name("result")
        .map(|t| ctx.node_text(&t).to_string());
    let (parameter_types, parameter_names) = node
        .child_by_field_name("parameters")
        .map(|p| extract_params(&p, ctx))
        .unwrap_or_default();

    let id = node_id(NodeKind::MethodDeclaration, &name, &parameter_types, &file, line);
    let method_node = Node::new(
        id.clone(),
        NodeKind::MethodDeclaration,
        name.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_modifier(modifier)
    .with_details(NodeDetails::Function(FunctionDetails {
        return_type,
        parameter_types,
        parameter_names,
        throws: Vec::new(),
        annotations: Vec::new(),
        javadoc: None,
    }));
    graph.add_node(method_node);

    let old_context = ctx.current_context.take();
    ctx.current_context = Some(ContextFrame {
        id,
        kind: NodeKind::MethodDeclaration,
        name,
    });
    if let Some(body) = node.child_by_field_name("body") {
        recurse_children(&body, ctx, graph);
    }
    ctx.current_context = old_context;
}

fn extract_type_declaration(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "type_spec" {
            extract_type_spec(&child, ctx, graph);
        } else if child.kind() == "type_alias" {
            extract_type_spec(&child, ctx, graph);
        }
    }
}

fn extract_type_spec(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let name = ctx.node_text(&name_node).to_string();
    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let type_node = node.child_by_field_name("type");
    let (kind, fields) = match type_node.map(|t| t.kind()) {
        Some("struct_type") => {
            let fields = type_node
                .map(|t| extract_struct_fields(&t, ctx))
                .unwrap_or_default();
            (NodeKind::StructDefinition, fields)
        }
        Some("interface_type") => {
            let fields = type_node
                .map(|t| extract_interface_members(&t, ctx))
                .unwrap_or_default();
            (NodeKind::Interface, fields)
        }
        _ => (
            NodeKind::TypeAlias,
            type_node
                .map(|t| vec![ctx.node_text(&t).to_string()])
                .unwrap_or_default(),
        ),
    };

    let modifier = Modifier::from_go_identifier(&name);
    let id = node_id(kind, &name, &[], &file, line);
    let type_node_ir = Node::new(
        id,
        kind,
        name,
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_modifier(modifier)
    .with_details(NodeDetails::Container(fields));
    graph.add_node(type_node_ir);
}

/// `"Name: Type"` strings; embedded types contribute bare type text.
fn extract_struct_fields<'a>(struct_node: &TsNode, ctx: &TranslationContext<'a>) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = struct_node.walk();
    for list in struct_node.children(&mut cursor) {
        if list.kind() != "field_declaration_list" {
            continue;
        }
        let mut field_cursor = list.walk();
        for field in list.children(&mut field_cursor) {
            if field.kind() != "field_declaration" {
                continue;
            }
            let ty = field
                .child_by_field_name("type")
                .map(|t| ctx.node_text(&t).to_string())
                .unwrap_or_default();
            let mut name_cursor = field.walk();
            let names: Vec<String> = field
                .children(&mut name_cursor)
                .filter(|n| n.kind() == "field_identifier")
                .map(|n| ctx.node_text(&n).to_string())
                .collect();
            if names.is_empty() {
                out.push(ty);
            } else {
                for name in names {
                    out.push(format!("{}: {}", name, ty));
                }
            }
        }
    }
    out
}

fn extract_interface_members<'a>(iface_node: &TsNode, ctx: &TranslationContext<'a>) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = iface_node.walk();
    for child in iface_node.named_children(&mut cursor) {
        out.push(ctx.node_text(&child).to_string());
    }
    out
}

fn extract_grouped_decl(
    node: &TsNode,
    ctx: &mut TranslationContext,
    graph: &mut Graph,
    kind: NodeKind,
) {
    let mut cursor = node.walk();
    for spec in node.children(&mut cursor) {
        if spec.kind() != "var_spec" && spec.kind() != "const_spec" {
            continue;
        }
        let ty = spec
            .child_by_field_name("type")
            .map(|t| ctx.node_text(&t).to_string());
        let value = spec
            .child_by_field_name("value")
            .map(|v| ctx.node_text(&v).to_string());

        let mut name_cursor = spec.walk();
        let names: Vec<String> = spec
            .children(&mut name_cursor)
            .filter(|n| n.kind() == "identifier")
            .map(|n| ctx.node_text(&n).to_string())
            .collect();

        for name in names {
            let line = ctx.line_number(&spec);
            let file = ctx.file_str();
            let modifier = Modifier::from_go_identifier(&name);
            let id = node_id(kind, &name, &[], &file, line);
            let var_node = Node::new(
                id,
                kind,
                name,
                ctx.file.clone(),
                ctx.source_range(&spec),
                line,
                ctx.language_flag,
            )
            .with_modifier(modifier)
            .with_details(NodeDetails::Variable(VariableDetails {
                data_type: ty.clone(),
                variable_value: value.clone(),
                scope: Some(Scope::Module),
            }));
            graph.add_node(var_node);
        }
    }
}

fn collect_lhs_names<'a>(node: &TsNode, ctx: &TranslationContext<'a>) -> Vec<String> {
    let Some(left) = node.child_by_field_name("left") else {
        return Vec::new();
    };
    let mut cursor = left.walk();
    left.named_children(&mut cursor)
        .map(|c| ctx.node_text(&c).to_string())
        .collect()
}

fn extract_short_var(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    extract_assignment_like(node, ctx, graph);
}

fn extract_assignment_statement(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    extract_assignment_like(node, ctx, graph);
}

/// `multi_var_assignment` when more than one LHS identifier; blank `_` is
/// skipped from output but counted toward the multi decision.
fn extract_assignment_like(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let all_names = collect_lhs_names(node, ctx);
    let is_multi = all_names.len() > 1;
    let kind = if is_multi {
        NodeKind::MultiVarAssignment
    } else {
        NodeKind::VariableAssignment
    };
    let value = node
        .child_by_field_name("right")
        .map(|v| ctx.node_text(&v).to_string());
    let line = ctx.line_number(node);
    let file = ctx.file_str();

    for name in all_names.iter().filter(|n| n.as_str() != "_") {
        let id = node_id(kind, name, &[], &file, line);
        let var_node = Node::new(
            id,
            kind,
            name.clone(),
            ctx.file.clone(),
            ctx.source_range(node),
            line,
            ctx.language_flag,
        )
        .with_details(NodeDetails::Variable(VariableDetails {
            data_type: None,
            variable_value: value.clone(),
            scope: Some(Scope::Local),
        }));
        graph.add_node(var_node);
    }

    if let Some(right) = node.child_by_field_name("right") {
        walk(&right, ctx, graph);
    }
}

/// Classifies `foo()` as `call` vs `a.b()`/`pkg.Fn()` as `method_expression`;
/// for selectors, the object text goes in `receiver`.
fn extract_call(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(func_node) = node.child_by_field_name("function") else {
        recurse_children(node, ctx, graph);
        return;
    };

    let (kind, name, receiver) = if func_node.kind() == "selector_expression" {
        let object = func_node
            .child_by_field_name("operand")
            .map(|o| ctx.node_text(&o).to_string());
        let field = func_node
            .child_by_field_name("field")
            .map(|f| ctx.node_text(&f).to_string())
            .unwrap_or_default();
        (NodeKind::MethodExpression, field, object)
    } else {
        (NodeKind::Call, ctx.node_text(&func_node).to_string(), None)
    };

    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let mut arguments = Vec::new();
    if let Some(args_node) = node.child_by_field_name("arguments") {
        let mut cursor = args_node.walk();
        for child in args_node.named_children(&mut cursor) {
            arguments.push(ctx.node_text(&child).to_string());
        }
    }

    let id = node_id(kind, &name, &arguments, &file, line);
    let call_node = Node::new(
        id.clone(),
        kind,
        name,
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_is_external(true)
    .with_details(NodeDetails::Call(CallDetails {
        arguments,
        receiver,
    }));
    graph.add_node(call_node);

    if let Some(ref from) = ctx.current_context {
        graph.add_edge(&from.id, &id);
    }

    if let Some(args_node) = node.child_by_field_name("arguments") {
        recurse_children(&args_node, ctx, graph);
    }
}

/// Finds the inner `call_expression` under a `defer`/`go` statement.
fn extract_defer_or_go(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "call_expression" {
            extract_call(&child, ctx, graph);
            return;
        }
    }
    recurse_children(node, ctx, graph);
}

fn extract_return(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let value = node.named_child(0).map(|n| ctx.node_text(&n).to_string());
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let id = node_id(NodeKind::ReturnStmt, "return", &[], &file, line);
    let return_node = Node::new(
        id,
        NodeKind::ReturnStmt,
        "return",
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Statement(StatementPayload::Return {
        value: value.clone(),
    }));
    graph.add_node(return_node);

    if let Some(v) = node.named_child(0) {
        walk(&v, ctx, graph);
    }
}

fn extract_for(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let init = capture_text(node.child_by_field_name("initializer"), ctx)
        .or_else(|| capture_text(node.child_by_field_name("left"), ctx));
    let condition = capture_text(node.child_by_field_name("condition"), ctx)
        .or_else(|| capture_text(node.child_by_field_name("right"), ctx));
    let update = capture_text(node.child_by_field_name("update"), ctx);
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let name = condition.clone().unwrap_or_else(|| "for".to_string());

    let id = node_id(NodeKind::ForStmt, &name, &[], &file, line);
    let for_node = Node::new(
        id,
        NodeKind::ForStmt,
        name,
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Statement(StatementPayload::For {
        init,
        condition,
        update,
    }));
    graph.add_node(for_node);

    if let Some(body) = node.child_by_field_name("body") {
        walk(&body, ctx, graph);
    }
}

fn extract_if(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let condition = capture_text(node.child_by_field_name("condition"), ctx).unwrap_or_default();
    let then_text = capture_text(node.child_by_field_name("consequence"), ctx).unwrap_or_default();
    let else_text = capture_text(node.child_by_field_name("alternative"), ctx);
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let id = node_id(NodeKind::IfStmt, &condition, &[], &file, line);
    let if_node = Node::new(
        id,
        NodeKind::IfStmt,
        condition.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Statement(StatementPayload::If {
        condition,
        then_text,
        else_text,
    }));
    graph.add_node(if_node);

    if let Some(c) = node.child_by_field_name("consequence") {
        walk(&c, ctx, graph);
    }
    if let Some(a) = node.child_by_field_name("alternative") {
        walk(&a, ctx, graph);
    }
}

fn capture_text(node: Option<TsNode>, ctx: &TranslationContext<'_>) -> Option<String> {
    node.map(|n| ctx.node_text(&n).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn init_function_gets_special_kind() {
        let source = "package main\nfunc init() {}\nfunc main() {}\n";
        let graph = translate_go(source, Path::new("m.go"));
        assert_eq!(graph.find_by_kind(NodeKind::InitFunction).len(), 1);
        assert_eq!(graph.find_by_kind(NodeKind::FunctionDeclaration).len(), 1);
    }

    #[test]
    fn method_receiver_pointer_is_stripped() {
        let source = "package main\ntype T struct{}\nfunc (t *T) Do() {}\n";
        let graph = translate_go(source, Path::new("m.go"));
        let methods = graph.find_by_kind(NodeKind::MethodDeclaration);
        assert_eq!(methods.len(), 1);
        assert_eq!(methods[0].name, "T.Do");
    }

    #[test]
    fn grouped_type_declaration_emits_one_node_per_spec() {
        let source = "package main\ntype (\n  A int\n  B string\n)\n";
        let graph = translate_go(source, Path::new("m.go"));
        assert_eq!(graph.find_by_kind(NodeKind::TypeAlias).len(), 2);
    }

    #[test]
    fn grouped_var_declaration_expands_names() {
        let source = "package main\nvar x, y int\n";
        let graph = translate_go(source, Path::new("m.go"));
        assert_eq!(graph.find_by_kind(NodeKind::ModuleVariable).len(), 2);
    }

    #[test]
    fn blank_identifier_is_skipped_but_counted_for_multi() {
        let source = "package main\nfunc f() {\n  _, err := g()\n}\nfunc g() (int, error) { return 0, nil }\n";
        let graph = translate_go(source, Path::new("m.go"));
        let assignments = graph.find_by_kind(NodeKind::MultiVarAssignment);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].name, "err");
    }

    #[test]
    fn selector_call_is_method_expression_with_receiver() {
        let source = "package main\nfunc f() {\n  fmt.Println(\"hi\")\n}\n";
        let graph = translate_go(source, Path::new("m.go"));
        let calls = graph.find_by_kind(NodeKind::MethodExpression);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "Println");
        if let NodeDetails::Call(details) = &calls[0].details {
            assert_eq!(details.receiver.as_deref(), Some("fmt"));
        } else {
            panic!("expected call details");
        }
    }

    #[test]
    fn keyword_filter_recognizes_keywords_and_builtins() {
        assert!(is_go_keyword("func"));
        assert!(is_go_keyword("nil"));
        assert!(is_go_keyword("string"));
        assert!(is_go_keyword("append"));
        assert!(!is_go_keyword("MyFunc"));
    }
}

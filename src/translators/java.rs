//! Java Translator.
//!
//! Recursive descent over the tree-sitter Java AST carrying a mutable
//! "current context" node — the nearest enclosing declaration, used as
//! the `from` side of call edges.

use crate::parsing::{self, Language, TranslationContext};
use crate::shared::{
    node_id, CallDetails, ClassDetails, FunctionDetails, Graph, Javadoc, JavadocTag, LanguageFlag,
    Modifier, Node, NodeDetails, NodeKind, Scope, StatementPayload, VariableDetails,
};
use std::path::Path;
use tree_sitter::Node as TsNode;

pub fn translate_java(source: &str, file: &Path) -> Graph {
    let mut graph = Graph::new();
    let Some(tree) = parsing::parse(source, Language::Java) else {
        return graph;
    };
    let mut ctx = TranslationContext::new(source, file, LanguageFlag::Java);
    walk(&tree.root_node(), &mut ctx, &mut graph);
    graph
}

fn walk(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    match node.kind() {
        "class_declaration" => extract_class(node, ctx, graph),
        "method_declaration" => extract_method(node, ctx, graph),
        "constructor_declaration" => extract_method(node, ctx, graph),
        "method_invocation" => extract_invocation(node, ctx, graph),
        "object_creation_expression" => extract_object_creation(node, ctx, graph),
        "field_declaration" => extract_variable(node, ctx, graph, Scope::Class),
        "local_variable_declaration" => extract_variable(node, ctx, graph, Scope::Local),
        "binary_expression" => extract_binary_expression(node, ctx, graph),
        "if_statement" => extract_if(node, ctx, graph),
        "while_statement" => extract_while(node, ctx, graph),
        "do_statement" => extract_do(node, ctx, graph),
        "for_statement" => extract_for(node, ctx, graph),
        "return_statement" => extract_simple(node, ctx, graph, NodeKind::ReturnStmt, "return"),
        "break_statement" => extract_simple(node, ctx, graph, NodeKind::BreakStmt, "break"),
        "continue_statement" => {
            extract_simple(node, ctx, graph, NodeKind::ContinueStmt, "continue")
        }
        "assert_statement" => extract_assert(node, ctx, graph),
        "yield_statement" => extract_simple(node, ctx, graph, NodeKind::YieldStmt, "yield"),
        "block" => extract_block(node, ctx, graph),
        "block_comment" => extract_block_comment(node, ctx, graph),
        _ => recurse_children(node, ctx, graph),
    }
}

fn recurse_children(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(&child, ctx, graph);
    }
}

fn first_type_child_text<'a>(node: &TsNode, ctx: &TranslationContext<'a>) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind().contains("type") {
            return Some(ctx.node_text(&child).to_string());
        }
    }
    None
}

/// Finds the `block_comment` sibling immediately preceding `node`, parses
/// it as Javadoc if it starts with `/*`.
fn preceding_javadoc(node: &TsNode, source: &str) -> Option<Javadoc> {
    let comment = node.prev_sibling().filter(|s| s.kind() == "block_comment")?;
    let text = comment.utf8_text(source.as_bytes()).ok()?;
    if !text.trim_start().starts_with("/*") {
        return None;
    }
    Some(parse_javadoc(text))
}

fn parse_javadoc(raw: &str) -> Javadoc {
    let mut javadoc = Javadoc {
        raw_text: raw.to_string(),
        line_count: raw.lines().count(),
        ..Default::default()
    };
    for line in raw.lines() {
        let trimmed = line.trim().trim_start_matches('*').trim();
        if !trimmed.starts_with('@') {
            continue;
        }
        let mut parts = trimmed.splitn(2, char::is_whitespace);
        let tag_token = parts.next().unwrap_or("");
        let tag_text = parts.next().unwrap_or("").trim().to_string();
        let tag_name = tag_token.trim_start_matches('@');
        let kind = match tag_name {
            "author" | "version" | "param" | "throws" | "see" | "since" => tag_name.to_string(),
            "" => continue,
            _ => "unknown".to_string(),
        };
        match tag_name {
            "author" => javadoc.author = Some(tag_text.clone()),
            "version" => javadoc.version = Some(tag_text.clone()),
            _ => {}
        }
        javadoc.tags.push(JavadocTag {
            kind,
            text: tag_text,
        });
    }
    javadoc
}

fn extract_block_comment(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let text = ctx.node_text(node).to_string();
    if !text.trim_start().starts_with("/*") {
        return;
    }
    let javadoc = parse_javadoc(&text);
    let line = ctx.line_number(node);
    let id = node_id(NodeKind::BlockComment, "javadoc", &[], &ctx.file_str(), line);
    let comment_node = Node::new(
        id,
        NodeKind::BlockComment,
        "javadoc",
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::BlockComment(javadoc));
    graph.add_node(comment_node);
}

fn extract_class(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let name = ctx.node_text(&name_node).to_string();
    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let modifier_text = node
        .child_by_field_name("modifiers")
        .map(|m| ctx.node_text(&m).to_string())
        .unwrap_or_default();
    let modifier = Modifier::from_java_modifiers(&modifier_text);

    let super_class = node
        .child_by_field_name("superclass")
        .and_then(|s| s.named_child(0))
        .map(|t| ctx.node_text(&t).to_string());

    let mut interface_list = Vec::new();
    if let Some(interfaces) = node.child_by_field_name("interfaces") {
        if let Some(type_list) = interfaces.named_child(0) {
            let mut cursor = type_list.walk();
            for t in type_list.named_children(&mut cursor) {
                interface_list.push(ctx.node_text(&t).to_string());
            }
        }
    }

    let annotations = extract_marker_annotations(&modifier_text);
    let javadoc = preceding_javadoc(node, ctx.source);

    let id = node_id(NodeKind::ClassDeclaration, &name, &[], &file, line);
    let class_node = Node::new(
        id.clone(),
        NodeKind::ClassDeclaration,
        name.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_modifier(modifier)
    .with_details(NodeDetails::Class(ClassDetails {
        package_name: None,
        super_class,
        interface_list,
        annotations,
        javadoc,
    }));
    graph.add_node(class_node);

    let old_context = ctx.current_context.take();
    ctx.current_context = Some(crate::parsing::ContextFrame {
        id,
        kind: NodeKind::ClassDeclaration,
        name,
    });

    if let Some(body) = node.child_by_field_name("body") {
        recurse_children(&body, ctx, graph);
    }

    ctx.current_context = old_context;
}

fn extract_marker_annotations(modifier_text: &str) -> Vec<String> {
    modifier_text
        .split_whitespace()
        .filter(|tok| tok.starts_with('@'))
        .map(|tok| tok.trim_start_matches('@').to_string())
        .collect()
}

fn extract_parameters<'a>(
    params_node: &TsNode,
    ctx: &TranslationContext<'a>,
) -> (Vec<String>, Vec<String>) {
    let mut types = Vec::new();
    let mut names = Vec::new();
    let mut cursor = params_node.walk();
    for child in params_node.children(&mut cursor) {
        if child.kind() != "formal_parameter" {
            continue;
        }
        let ty = child
            .child_by_field_name("type")
            .map(|t| ctx.node_text(&t).to_string())
            .unwrap_or_default();
        let name = child
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n).to_string())
            .unwrap_or_default();
        types.push(ty);
        names.push(name);
    }
    (types, names)
}

fn extract_method(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let name = node
        .child_by_field_name("name")
        .map(|n| ctx.node_text(&n).to_string())
        .unwrap_or_else(|| "<init>".to_string());
    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let modifier_text = node
        .child_by_field_name("modifiers")
        .map(|m| ctx.node_text(&m).to_string())
        .unwrap_or_default();
    let modifier = Modifier::from_java_modifiers(&modifier_text);
    let annotations = extract_marker_annotations(&modifier_text);

    let return_type = node
        .child_by_field_name("type")
        .map(|t| ctx.node_text(&t).to_string());

    let (parameter_types, parameter_names) = node
        .child_by_field_name("parameters")
        .map(|p| extract_parameters(&p, ctx))
        .unwrap_or_default();

    let mut throws = Vec::new();
    if let Some(throws_node) = node.child_by_field_name("throws") {
        let mut cursor = throws_node.walk();
        for t in throws_node.named_children(&mut cursor) {
            throws.push(ctx.node_text(&t).to_string());
        }
    }

    let javadoc = preceding_javadoc(node, ctx.source);
    let kind = if node.kind() == "constructor_declaration" {
        NodeKind::Constructor
    } else {
        NodeKind::MethodDeclaration
    };

    let id = node_id(kind, &name, &parameter_types, &file, line);
    let method_node = Node::new(
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
        throws,
        annotations,
        javadoc,
    }));
    graph.add_node(method_node);

    let old_context = ctx.current_context.take();
    ctx.current_context = Some(crate::parsing::ContextFrame {
        id,
        kind,
        name,
    });

    if let Some(body) = node.child_by_field_name("body") {
        recurse_children(&body, ctx, graph);
    }

    ctx.current_context = old_context;
}

fn extract_invocation(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let name = node
        .child_by_field_name("name")
        .map(|n| ctx.node_text(&n).to_string())
        .unwrap_or_default();
    if name.is_empty() {
        recurse_children(node, ctx, graph);
        return;
    }
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let arguments = node
        .child_by_field_name("arguments")
        .map(|a| extract_arguments(&a, ctx))
        .unwrap_or_default();

    let id = node_id(NodeKind::MethodInvocation, &name, &arguments, &file, line);
    let invocation_node = Node::new(
        id.clone(),
        NodeKind::MethodInvocation,
        name,
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_is_external(true)
    .with_details(NodeDetails::Call(CallDetails {
        arguments,
        receiver: node
            .child_by_field_name("object")
            .map(|o| ctx.node_text(&o).to_string()),
    }));
    graph.add_node(invocation_node);

    if let Some(ref from) = ctx.current_context {
        graph.add_edge(&from.id, &id);
    }

    // Recurse into the object/arguments to catch nested invocations.
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(&child, ctx, graph);
    }
}

/// Strips surrounding quotes from string literal arguments, and the
/// delimiters `( ) { } [ ] ,`.
fn extract_arguments<'a>(args_node: &TsNode, ctx: &TranslationContext<'a>) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = args_node.walk();
    for child in args_node.named_children(&mut cursor) {
        let text = ctx.node_text(&child);
        let cleaned = text.trim_matches(|c| "(){}[],".contains(c));
        let cleaned = if child.kind() == "string_literal" {
            cleaned.trim_matches('"').to_string()
        } else {
            cleaned.to_string()
        };
        if !cleaned.is_empty() {
            out.push(cleaned);
        }
    }
    out
}

fn extract_object_creation(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let class_name = node
        .child_by_field_name("type")
        .map(|t| ctx.node_text(&t).to_string())
        .unwrap_or_default();
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let arguments = node
        .child_by_field_name("arguments")
        .map(|a| extract_arguments(&a, ctx))
        .unwrap_or_default();

    let id = node_id(
        NodeKind::ClassInstanceExpr,
        &class_name,
        &arguments,
        &file,
        line,
    );
    let creation_node = Node::new(
        id,
        NodeKind::ClassInstanceExpr,
        class_name.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_is_external(true)
    .with_details(NodeDetails::Statement(StatementPayload::ClassInstantiation {
        class_name,
        arguments,
    }));
    graph.add_node(creation_node);

    if let Some(args) = node.child_by_field_name("arguments") {
        recurse_children(&args, ctx, graph);
    }
}

fn classify_operator(op: &str) -> NodeKind {
    match op {
        "+" => NodeKind::AddExpression,
        "-" => NodeKind::SubExpression,
        "*" => NodeKind::MulExpression,
        "/" => NodeKind::DivExpression,
        "%" => NodeKind::RemExpression,
        "<" | ">" | "<=" | ">=" => NodeKind::CompExpression,
        "==" => NodeKind::EqExpression,
        "!=" => NodeKind::NeExpression,
        "&&" => NodeKind::AndExpression,
        "||" => NodeKind::OrExpression,
        "&" => NodeKind::BitwiseAndExpression,
        "|" => NodeKind::BitwiseOrExpression,
        "^" => NodeKind::BitwiseXorExpression,
        "<<" => NodeKind::LeftShiftExpression,
        ">>" => NodeKind::RightShiftExpression,
        ">>>" => NodeKind::BitwiseRightShiftExpression,
        _ => NodeKind::BinaryExpression,
    }
}

fn extract_binary_expression(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let Some(left) = node.child_by_field_name("left") else {
        recurse_children(node, ctx, graph);
        return;
    };
    let Some(right) = node.child_by_field_name("right") else {
        recurse_children(node, ctx, graph);
        return;
    };
    let operator = node
        .child(1)
        .map(|o| ctx.node_text(&o).to_string())
        .unwrap_or_default();
    let left_text = ctx.node_text(&left).to_string();
    let right_text = ctx.node_text(&right).to_string();
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let refined_kind = classify_operator(&operator);

    let payload = StatementPayload::BinaryExpr {
        left: left_text,
        right: right_text,
        operator: operator.clone(),
    };

    let generic_id = node_id(NodeKind::BinaryExpression, &operator, &[], &file, line);
    let generic_node = Node::new(
        generic_id,
        NodeKind::BinaryExpression,
        operator.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Statement(payload.clone()));
    graph.add_node(generic_node);

    if refined_kind != NodeKind::BinaryExpression {
        let refined_id = node_id(refined_kind, &operator, &[], &file, line);
        let refined_node = Node::new(
            refined_id,
            refined_kind,
            operator,
            ctx.file.clone(),
            ctx.source_range(node),
            line,
            ctx.language_flag,
        )
        .with_details(NodeDetails::Statement(payload));
        graph.add_node(refined_node);
    }

    walk(&left, ctx, graph);
    walk(&right, ctx, graph);
}

fn extract_variable(
    node: &TsNode,
    ctx: &mut TranslationContext,
    graph: &mut Graph,
    scope: Scope,
) {
    let declarator = node.child_by_field_name("declarator");
    let Some(declarator) = declarator else {
        recurse_children(node, ctx, graph);
        return;
    };
    let name = declarator
        .child_by_field_name("name")
        .map(|n| ctx.node_text(&n).to_string())
        .unwrap_or_default();
    if name.is_empty() {
        recurse_children(node, ctx, graph);
        return;
    }
    let line = ctx.line_number(node);
    let file = ctx.file_str();

    let data_type = first_type_child_text(node, ctx);
    let variable_value = declarator
        .child_by_field_name("value")
        .map(|v| ctx.node_text(&v).split_whitespace().collect::<String>());

    let kind = if scope == Scope::Class {
        NodeKind::ClassField
    } else {
        NodeKind::VariableDeclaration
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
        variable_value,
        scope: Some(scope),
    }));
    graph.add_node(var_node);

    if let Some(value) = declarator.child_by_field_name("value") {
        walk(&value, ctx, graph);
    }
}

fn capture_text(node: Option<TsNode>, ctx: &TranslationContext<'_>) -> Option<String> {
    node.map(|n| ctx.node_text(&n).to_string())
}

fn extract_if(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let condition = capture_text(node.child_by_field_name("condition"), ctx).unwrap_or_default();
    let then_text =
        capture_text(node.child_by_field_name("consequence"), ctx).unwrap_or_default();
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

fn extract_while(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let condition = capture_text(node.child_by_field_name("condition"), ctx).unwrap_or_default();
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let id = node_id(NodeKind::WhileStmt, &condition, &[], &file, line);
    let while_node = Node::new(
        id,
        NodeKind::WhileStmt,
        condition.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Statement(StatementPayload::While { condition }));
    graph.add_node(while_node);

    if let Some(b) = node.child_by_field_name("body") {
        walk(&b, ctx, graph);
    }
}

fn extract_do(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let condition = capture_text(node.child_by_field_name("condition"), ctx).unwrap_or_default();
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let id = node_id(NodeKind::DoStmt, &condition, &[], &file, line);
    let do_node = Node::new(
        id,
        NodeKind::DoStmt,
        condition.clone(),
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::Statement(StatementPayload::DoWhile { condition }));
    graph.add_node(do_node);

    if let Some(b) = node.child_by_field_name("body") {
        walk(&b, ctx, graph);
    }
}

fn extract_for(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let init = capture_text(node.child_by_field_name("init"), ctx);
    let condition = capture_text(node.child_by_field_name("condition"), ctx);
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

    if let Some(b) = node.child_by_field_name("body") {
        walk(&b, ctx, graph);
    }
}

/// A `{ ... }` block reached as the body of `if`/`while`/`do`/`for` (method
/// and constructor bodies are attributed to their enclosing declaration
/// instead and never re-dispatch through `walk`). No dedicated payload
/// exists for a bare block, so the raw text lives on `source_range` and
/// the statements inside are walked as their own nodes.
fn extract_block(node: &TsNode, ctx: &mut TranslationContext, graph: &mut Graph) {
    let line = ctx.line_number(node);
    let file = ctx.file_str();
    let id = node_id(NodeKind::BlockStmt, "block", &[], &file, line);
    let block_node = Node::new(
        id,
        NodeKind::BlockStmt,
        "block",
        ctx.file.clone(),
        ctx.source_range(node),
        line,
        ctx.language_flag,
    )
    .with_details(NodeDetails::None);
    graph.add_node(block_node);

    recurse_children(node, ctx, graph);
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
    use crate::shared::NodeKind;
    use std::path::Path;

    #[test]
    fn class_method_invocation_edge() {
        let source = r#"
public class InvocationClass {
  public void caller() { callee(); }
  private void callee() { fmt.Println("Hello, World!"); }
}
"#;
        let graph = translate_java(source, Path::new("InvocationClass.java"));

        let classes = graph.find_by_kind(NodeKind::ClassDeclaration);
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "InvocationClass");

        let methods = graph.find_by_kind(NodeKind::MethodDeclaration);
        assert_eq!(methods.len(), 2);

        let invocations = graph.find_by_kind(NodeKind::MethodInvocation);
        assert_eq!(invocations.len(), 2);
        assert!(invocations.iter().any(|n| n.name == "callee"));
        assert!(invocations.iter().any(|n| n.name == "Println"));

        let caller = methods.iter().find(|m| m.name == "caller").unwrap();
        let callee_invocation = invocations.iter().find(|n| n.name == "callee").unwrap();
        assert!(caller
            .outgoing_edges
            .iter()
            .any(|&idx| graph.edges()[idx].to == callee_invocation.id));
    }

    #[test]
    fn visibility_is_extracted_from_modifiers() {
        let source = "public class Foo { private int x; }";
        let graph = translate_java(source, Path::new("Foo.java"));
        let class = &graph.find_by_kind(NodeKind::ClassDeclaration)[0];
        assert_eq!(class.modifier, Modifier::Public);
    }

    #[test]
    fn javadoc_author_and_version_tags_are_parsed() {
        let source = r#"
/**
 * @author Jane Doe
 * @version 1.0
 */
public class Documented {}
"#;
        let graph = translate_java(source, Path::new("Documented.java"));
        let class = &graph.find_by_kind(NodeKind::ClassDeclaration)[0];
        if let NodeDetails::Class(details) = &class.details {
            let javadoc = details.javadoc.as_ref().expect("javadoc present");
            assert_eq!(javadoc.author.as_deref(), Some("Jane Doe"));
            assert_eq!(javadoc.version.as_deref(), Some("1.0"));
        } else {
            panic!("expected class details");
        }
    }

    #[test]
    fn binary_expression_emits_generic_and_refined_nodes() {
        let source = "class A { void m() { int x = 1 + 2; } }";
        let graph = translate_java(source, Path::new("A.java"));
        assert_eq!(graph.find_by_kind(NodeKind::BinaryExpression).len(), 1);
        assert_eq!(graph.find_by_kind(NodeKind::AddExpression).len(), 1);
    }

    #[test]
    fn nested_block_inside_while_body_is_extracted() {
        let source = "class A { void m() { while (true) { int x = 1; } } }";
        let graph = translate_java(source, Path::new("A.java"));
        assert_eq!(graph.find_by_kind(NodeKind::BlockStmt).len(), 1);
        // The statement inside the nested block is still walked as its own node.
        assert_eq!(graph.find_by_kind(NodeKind::VariableDeclaration).len(), 1);
    }

    #[test]
    fn method_body_block_is_not_double_counted() {
        let source = "class A { void m() { int x = 1; } }";
        let graph = translate_java(source, Path::new("A.java"));
        assert_eq!(graph.find_by_kind(NodeKind::BlockStmt).len(), 0);
    }
}

//! Node model.
//!
//! A flat, cheap-to-iterate header (id, kind, name,
//! file, range, line) plus a tagged `NodeDetails` payload so that a
//! `method_declaration` doesn't carry Dockerfile fields and vice versa.

use super::span::SourceRange;
use std::path::PathBuf;

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Declarations
    ClassDeclaration,
    ClassDefinition,
    Interface,
    Enum,
    Dataclass,
    StructDefinition,
    TypeAlias,
    FunctionDeclaration,
    MethodDeclaration,
    Method,
    Constructor,
    Property,
    SpecialMethod,
    InitFunction,

    // Statements
    BlockStmt,
    IfStmt,
    ForStmt,
    WhileStmt,
    DoStmt,
    ReturnStmt,
    BreakStmt,
    ContinueStmt,
    AssertStmt,
    YieldStmt,

    // Expressions
    BinaryExpression,
    AddExpression,
    SubExpression,
    MulExpression,
    DivExpression,
    RemExpression,
    CompExpression,
    EqExpression,
    NeExpression,
    AndExpression,
    OrExpression,
    BitwiseAndExpression,
    BitwiseOrExpression,
    BitwiseXorExpression,
    LeftShiftExpression,
    RightShiftExpression,
    BitwiseRightShiftExpression,
    ClassInstanceExpr,
    Call,
    MethodExpression,
    MethodInvocation,

    // Variables
    VariableDeclaration,
    VariableAssignment,
    MultiVarAssignment,
    ModuleVariable,
    ClassField,
    Constant,

    // Container configuration
    DockerfileInstruction,
    ComposeService,

    // Commentary
    BlockComment,
}

impl NodeKind {
    /// Snake-case identifier (e.g. `"method_declaration"`).
    pub fn as_str(&self) -> &'static str {
        use NodeKind::*;
        match self {
            ClassDeclaration => "class_declaration",
            ClassDefinition => "class_definition",
            Interface => "interface",
            Enum => "enum",
            Dataclass => "dataclass",
            StructDefinition => "struct_definition",
            TypeAlias => "type_alias",
            FunctionDeclaration => "function_declaration",
            MethodDeclaration => "method_declaration",
            Method => "method",
            Constructor => "constructor",
            Property => "property",
            SpecialMethod => "special_method",
            InitFunction => "init_function",
            BlockStmt => "block_stmt",
            IfStmt => "if_stmt",
            ForStmt => "for_stmt",
            WhileStmt => "while_stmt",
            DoStmt => "do_stmt",
            ReturnStmt => "return_stmt",
            BreakStmt => "break_stmt",
            ContinueStmt => "continue_stmt",
            AssertStmt => "assert_stmt",
            YieldStmt => "yield_stmt",
            BinaryExpression => "binary_expression",
            AddExpression => "add_expression",
            SubExpression => "sub_expression",
            MulExpression => "mul_expression",
            DivExpression => "div_expression",
            RemExpression => "rem_expression",
            CompExpression => "comp_expression",
            EqExpression => "eq_expression",
            NeExpression => "ne_expression",
            AndExpression => "and_expression",
            OrExpression => "or_expression",
            BitwiseAndExpression => "bitwise_and_expression",
            BitwiseOrExpression => "bitwise_or_expression",
            BitwiseXorExpression => "bitwise_xor_expression",
            LeftShiftExpression => "left_shift_expression",
            RightShiftExpression => "right_shift_expression",
            BitwiseRightShiftExpression => "bitwise_right_shift_expression",
            ClassInstanceExpr => "class_instance_expr",
            Call => "call",
            MethodExpression => "method_expression",
            MethodInvocation => "method_invocation",
            VariableDeclaration => "variable_declaration",
            VariableAssignment => "variable_assignment",
            MultiVarAssignment => "multi_var_assignment",
            ModuleVariable => "module_variable",
            ClassField => "class_field",
            Constant => "constant",
            DockerfileInstruction => "dockerfile_instruction",
            ComposeService => "compose_service",
            BlockComment => "block_comment",
        }
    }
}

/// Visibility. `protected` is allowed alongside the public/private/none
/// trio for languages (Java) that distinguish it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modifier {
    #[default]
    None,
    Public,
    Private,
    Protected,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Public => "public",
            Modifier::Private => "private",
            Modifier::Protected => "protected",
        }
    }

    /// Tokenizes Java modifier text on whitespace and returns the first of
    /// `public|private|protected`.
    pub fn from_java_modifiers(text: &str) -> Self {
        for tok in text.split_whitespace() {
            match tok {
                "public" => return Modifier::Public,
                "private" => return Modifier::Private,
                "protected" => return Modifier::Protected,
                _ => {}
            }
        }
        Modifier::None
    }

    /// Go visibility is derived from the leading letter's case.
    pub fn from_go_identifier(name: &str) -> Self {
        match name.chars().next() {
            Some(c) if c.is_uppercase() => Modifier::Public,
            Some(_) => Modifier::Private,
            None => Modifier::None,
        }
    }
}

/// Language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFlag {
    Java,
    Python,
    Go,
    Docker,
    Compose,
    Other,
}

impl LanguageFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageFlag::Java => "java",
            LanguageFlag::Python => "python",
            LanguageFlag::Go => "go",
            LanguageFlag::Docker => "docker",
            LanguageFlag::Compose => "compose",
            LanguageFlag::Other => "other",
        }
    }
}

/// Variable scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Local,
    Class,
    Module,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Class => "class",
            Scope::Module => "module",
        }
    }
}

/// A single recognized Javadoc tag.
#[derive(Debug, Clone)]
pub struct JavadocTag {
    pub kind: String,
    pub text: String,
}

/// Parsed Javadoc.
#[derive(Debug, Clone, Default)]
pub struct Javadoc {
    pub author: Option<String>,
    pub version: Option<String>,
    pub tags: Vec<JavadocTag>,
    pub line_count: usize,
    pub raw_text: String,
}

/// Kind-specific payload for structured statements. Sub-parts are carried
/// as raw text spans rather than re-parsed into further structure.
#[derive(Debug, Clone)]
pub enum StatementPayload {
    If {
        condition: String,
        then_text: String,
        else_text: Option<String>,
    },
    While {
        condition: String,
    },
    DoWhile {
        condition: String,
    },
    For {
        init: Option<String>,
        condition: Option<String>,
        update: Option<String>,
    },
    Return {
        value: Option<String>,
    },
    Assert {
        condition: String,
        message: Option<String>,
    },
    Yield {
        value: Option<String>,
    },
    BinaryExpr {
        left: String,
        right: String,
        operator: String,
    },
    ClassInstantiation {
        class_name: String,
        arguments: Vec<String>,
    },
}

/// Kind-specific fields, grouped by the declaration family that needs them.
#[derive(Debug, Clone, Default)]
pub struct FunctionDetails {
    pub return_type: Option<String>,
    pub parameter_types: Vec<String>,
    pub parameter_names: Vec<String>,
    pub throws: Vec<String>,
    pub annotations: Vec<String>,
    pub javadoc: Option<Javadoc>,
}

#[derive(Debug, Clone, Default)]
pub struct VariableDetails {
    pub data_type: Option<String>,
    pub variable_value: Option<String>,
    pub scope: Option<Scope>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassDetails {
    pub package_name: Option<String>,
    pub super_class: Option<String>,
    pub interface_list: Vec<String>,
    pub annotations: Vec<String>,
    pub javadoc: Option<Javadoc>,
}

/// `call` / `method_invocation` / `method_expression` payload. `receiver`
/// holds the selector's object text for Go method expressions — modeled as
/// an explicit field instead of overloading `interface_list`, which belongs
/// to Java class nodes.
#[derive(Debug, Clone, Default)]
pub struct CallDetails {
    pub arguments: Vec<String>,
    pub receiver: Option<String>,
}

#[derive(Debug, Clone)]
pub enum NodeDetails {
    None,
    Function(FunctionDetails),
    Variable(VariableDetails),
    Class(ClassDetails),
    Call(CallDetails),
    Statement(StatementPayload),
    /// Flattened `"key=value"` strings for `dockerfile_instruction` /
    /// `compose_service` nodes.
    Container(Vec<String>),
    BlockComment(Javadoc),
}

impl Default for NodeDetails {
    fn default() -> Self {
        NodeDetails::None
    }
}

/// A single node in the code graph.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub file: PathBuf,
    pub source_range: SourceRange,
    pub line_number: u32,
    pub is_external: bool,
    pub modifier: Modifier,
    pub language_flag: LanguageFlag,
    pub details: NodeDetails,
    /// Denormalized index of outgoing edges, by index into `Graph::edges`.
    /// Populated only by `Graph::add_edge` — never mutate this directly.
    pub outgoing_edges: Vec<usize>,
}

impl Node {
    pub fn new(
        id: String,
        kind: NodeKind,
        name: impl Into<String>,
        file: impl Into<PathBuf>,
        source_range: SourceRange,
        line_number: u32,
        language_flag: LanguageFlag,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            file: file.into(),
            source_range,
            line_number,
            is_external: false,
            modifier: Modifier::None,
            language_flag,
            details: NodeDetails::None,
            outgoing_edges: Vec::new(),
        }
    }

    pub fn with_is_external(mut self, is_external: bool) -> Self {
        self.is_external = is_external;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_details(mut self, details: NodeDetails) -> Self {
        self.details = details;
        self
    }

    /// Reads the node's source text on demand.
    pub fn source_text(&self) -> String {
        self.source_range.read_text()
    }
}

//! Parser for the datamodel schema language.
//!
//! The parser stays close to the grammar: it produces loosely-shaped
//! [`Declaration`] nodes whose children are tagged by kind (field,
//! enumerator, comment, block attribute). Only
//! [`crate::model::SchemaModel::from_ast`] interprets these shapes; the
//! resolver and emitter never see them.

use crate::error::{ParseError, ParseResult};

/// Kind of a top-level block declaration.
///
/// Block kinds the generator does not model (`datasource`, `generator`, …)
/// are carried as [`DeclKind::Other`] with their content unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclKind {
    Model,
    Type,
    Enum,
    Other(String),
}

/// A field's type as the grammar spells it: either a bare token or a token
/// the parser recognized as a reference to another declaration (a field
/// carrying a `relation` attribute). Both shapes carry the same string and
/// consumers must accept either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Name(String),
    Reference { name: String },
}

impl TypeRef {
    /// The referenced type name, regardless of shape.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Name(name) => name,
            TypeRef::Reference { name } => name,
        }
    }
}

/// A field line inside a model or composite-type block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub name: String,
    pub field_type: TypeRef,
    pub is_array: bool,
    pub is_optional: bool,
    /// Attribute names only; argument lists are not parsed.
    pub attributes: Vec<String>,
}

/// A child node inside a block declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Field(FieldNode),
    Enumerator { name: String },
    /// A doc-comment line, verbatim including its `///` marker.
    Comment { text: String },
    /// A block-level `@@` attribute, name only.
    BlockAttribute { name: String },
}

/// One top-level block declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// Doc-comment lines directly above the block header, verbatim.
    pub comments: Vec<String>,
    pub children: Vec<Node>,
}

/// The parsed schema: top-level declarations in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaAst {
    pub declarations: Vec<Declaration>,
}

/// Parse a schema source text into declaration nodes.
pub fn parse_schema(source: &str) -> ParseResult<SchemaAst> {
    let mut declarations = Vec::new();
    let mut pending_comments: Vec<String> = Vec::new();
    let mut lines = source.lines().enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }
        if line.starts_with("///") {
            pending_comments.push(line.to_string());
            continue;
        }
        if line.starts_with("//") {
            continue;
        }

        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => {
                return Err(ParseError::syntax(
                    line_no,
                    format!("expected a block declaration, found '{line}'"),
                ))
            }
        };

        let name = match rest.strip_suffix('{').map(str::trim) {
            Some(name) if !name.is_empty() => name,
            Some(_) => return Err(ParseError::missing_name(line_no, keyword)),
            None => {
                return Err(ParseError::syntax(
                    line_no,
                    format!("expected '{{' to open the '{keyword}' block"),
                ))
            }
        };

        let kind = match keyword {
            "model" => DeclKind::Model,
            "type" => DeclKind::Type,
            "enum" => DeclKind::Enum,
            other => DeclKind::Other(other.to_string()),
        };

        let children = parse_block(&mut lines, &kind, name, line_no)?;

        declarations.push(Declaration {
            kind,
            name: name.to_string(),
            comments: std::mem::take(&mut pending_comments),
            children,
        });
    }

    Ok(SchemaAst { declarations })
}

/// Parse the body of one block up to its closing `}`.
fn parse_block<'a, I>(
    lines: &mut I,
    kind: &DeclKind,
    name: &str,
    opened_at: usize,
) -> ParseResult<Vec<Node>>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut children = Vec::new();

    for (idx, raw) in lines {
        let line_no = idx + 1;
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }
        if line.starts_with('}') {
            return Ok(children);
        }
        if line.starts_with("///") {
            children.push(Node::Comment {
                text: line.to_string(),
            });
            continue;
        }
        if line.starts_with("//") {
            continue;
        }
        if let Some(attr) = line.strip_prefix("@@") {
            children.push(Node::BlockAttribute {
                name: attribute_name(attr).to_string(),
            });
            continue;
        }

        match kind {
            DeclKind::Enum => {
                if let Some(value) = line.split_whitespace().next() {
                    children.push(Node::Enumerator {
                        name: value.to_string(),
                    });
                }
            }
            DeclKind::Model | DeclKind::Type => {
                children.push(Node::Field(parse_field(line, line_no)?));
            }
            // Content of unmodeled blocks is not represented.
            DeclKind::Other(_) => {}
        }
    }

    Err(ParseError::UnterminatedBlock {
        line: opened_at,
        name: name.to_string(),
    })
}

/// Parse one field line: `name Type? @attr(...) @attr2`.
fn parse_field(line: &str, line_no: usize) -> ParseResult<FieldNode> {
    // Trailing line comments are not part of the field.
    let line = match line.find("//") {
        Some(idx) => line[..idx].trim_end(),
        None => line,
    };

    let mut tokens = line.split_whitespace();
    let name = match tokens.next() {
        Some(name) => name,
        None => return Err(ParseError::syntax(line_no, "empty field line")),
    };
    let type_token = match tokens.next() {
        Some(token) => token,
        None => return Err(ParseError::missing_field_type(line_no, name)),
    };

    let (type_token, is_optional) = match type_token.strip_suffix('?') {
        Some(stripped) => (stripped, true),
        None => (type_token, false),
    };
    let (type_token, is_array) = match type_token.strip_suffix("[]") {
        Some(stripped) => (stripped, true),
        None => (type_token, false),
    };

    let mut attributes = Vec::new();
    for token in tokens {
        if let Some(attr) = token.strip_prefix('@') {
            if !attr.starts_with('@') {
                attributes.push(attribute_name(attr).to_string());
            }
        }
    }

    let field_type = if attributes.iter().any(|attr| attr == "relation") {
        TypeRef::Reference {
            name: type_token.to_string(),
        }
    } else {
        TypeRef::Name(type_token.to_string())
    };

    Ok(FieldNode {
        name: name.to_string(),
        field_type,
        is_array,
        is_optional,
        attributes,
    })
}

/// The attribute name up to any argument list: `default(now())` -> `default`.
fn attribute_name(token: &str) -> &str {
    match token.find('(') {
        Some(idx) => &token[..idx],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_model_fields() {
        let ast = parse_schema(
            r#"
model User {
  id Int @id
  email String @unique
  firstName String?
  posts Post[]
}
"#,
        )
        .unwrap();

        assert_eq!(ast.declarations.len(), 1);
        let decl = &ast.declarations[0];
        assert_eq!(decl.kind, DeclKind::Model);
        assert_eq!(decl.name, "User");
        assert_eq!(decl.children.len(), 4);

        match &decl.children[0] {
            Node::Field(field) => {
                assert_eq!(field.name, "id");
                assert_eq!(field.field_type.name(), "Int");
                assert_eq!(field.attributes, vec!["id".to_string()]);
                assert!(!field.is_array);
                assert!(!field.is_optional);
            }
            other => panic!("expected field, got {other:?}"),
        }

        match &decl.children[2] {
            Node::Field(field) => {
                assert_eq!(field.name, "firstName");
                assert!(field.is_optional);
                assert!(!field.is_array);
            }
            other => panic!("expected field, got {other:?}"),
        }

        match &decl.children[3] {
            Node::Field(field) => {
                assert_eq!(field.name, "posts");
                assert_eq!(field.field_type.name(), "Post");
                assert!(field.is_array);
            }
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_relation_field_is_reference() {
        let ast = parse_schema(
            r#"
model Post {
  author User @relation(fields: [authorId], references: [id])
  authorId Int
}
"#,
        )
        .unwrap();

        let decl = &ast.declarations[0];
        match &decl.children[0] {
            Node::Field(field) => {
                assert_eq!(
                    field.field_type,
                    TypeRef::Reference {
                        name: "User".to_string()
                    }
                );
                assert!(field.attributes.contains(&"relation".to_string()));
            }
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_enum() {
        let ast = parse_schema("enum Role {\n  USER\n  ADMIN\n}\n").unwrap();
        let decl = &ast.declarations[0];
        assert_eq!(decl.kind, DeclKind::Enum);
        assert_eq!(
            decl.children,
            vec![
                Node::Enumerator {
                    name: "USER".to_string()
                },
                Node::Enumerator {
                    name: "ADMIN".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_parse_composite_type() {
        let ast = parse_schema("type Address {\n  street String\n}\n").unwrap();
        assert_eq!(ast.declarations[0].kind, DeclKind::Type);
    }

    #[test]
    fn test_parse_doc_comments() {
        let ast = parse_schema(
            r#"
/// The user model.
model User {
  /// Primary identifier.
  id Int @id
}
"#,
        )
        .unwrap();

        let decl = &ast.declarations[0];
        assert_eq!(decl.comments, vec!["/// The user model.".to_string()]);
        assert_eq!(
            decl.children[0],
            Node::Comment {
                text: "/// Primary identifier.".to_string()
            }
        );
    }

    #[test]
    fn test_line_comments_discarded() {
        let ast = parse_schema(
            r#"
// not a doc comment
model User {
  // neither is this
  id Int // nor this one
}
"#,
        )
        .unwrap();

        let decl = &ast.declarations[0];
        assert!(decl.comments.is_empty());
        assert_eq!(decl.children.len(), 1);
        match &decl.children[0] {
            Node::Field(field) => assert_eq!(field.attributes, Vec::<String>::new()),
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn test_block_attributes_kept_as_nodes() {
        let ast = parse_schema("model Pair {\n  a Int\n  b Int\n  @@id([a, b])\n}\n").unwrap();
        let decl = &ast.declarations[0];
        assert_eq!(
            decl.children[2],
            Node::BlockAttribute {
                name: "id".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_blocks_are_opaque() {
        let ast = parse_schema(
            r#"
datasource db {
  provider = "postgresql"
  url      = env("DATABASE_URL")
}

model User {
  id Int
}
"#,
        )
        .unwrap();

        assert_eq!(ast.declarations.len(), 2);
        assert_eq!(
            ast.declarations[0].kind,
            DeclKind::Other("datasource".to_string())
        );
        assert!(ast.declarations[0].children.is_empty());
    }

    #[test]
    fn test_missing_name() {
        let err = parse_schema("model {\n}\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingName { line: 1, .. }));
    }

    #[test]
    fn test_missing_field_type() {
        let err = parse_schema("model User {\n  id\n}\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingFieldType { line: 2, ref field } if field == "id"
        ));
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_schema("model User {\n  id Int\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnterminatedBlock { line: 1, ref name } if name == "User"
        ));
    }

    #[test]
    fn test_optional_array_suffixes() {
        let ast = parse_schema("model M {\n  xs Tag[]?\n}\n").unwrap();
        match &ast.declarations[0].children[0] {
            Node::Field(field) => {
                assert_eq!(field.field_type.name(), "Tag");
                assert!(field.is_array);
                assert!(field.is_optional);
            }
            other => panic!("expected field, got {other:?}"),
        }
    }
}

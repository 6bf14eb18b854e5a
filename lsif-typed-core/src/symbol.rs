//! Symbol grammar.
//!
//! A global symbol reads as
//!
//! ```text
//! <scheme> ' ' <manager> ' ' <package-name> ' ' <version> ' ' <descriptor>+
//! ```
//!
//! The first four fields end at a single space; a literal space inside them is
//! written as two spaces, and a lone `.` stands for an empty field. Local
//! symbols are written `local <id>` and are only meaningful inside the
//! document that declares them.
//!
//! Descriptors use a suffix to tell their kind apart:
//!
//! | Kind           | Syntax                  |
//! |----------------|-------------------------|
//! | namespace      | `name/`                 |
//! | type           | `name#`                 |
//! | term           | `name.`                 |
//! | meta           | `name:`                 |
//! | macro          | `name!`                 |
//! | method         | `name(disambiguator).`  |
//! | type parameter | `[name]`                |
//! | parameter      | `(name)`                |

use thiserror::Error;

const LOCAL_PREFIX: &str = "local ";
const LOCAL_SCHEME: &str = "local";

/// Whether the symbol is document-scoped.
pub fn is_local_symbol(symbol: &str) -> bool {
    symbol.starts_with(LOCAL_PREFIX)
}

/// Whether the symbol is exported from or imported into the index.
pub fn is_global_symbol(symbol: &str) -> bool {
    !is_local_symbol(symbol)
}

/// Errors produced while parsing a symbol string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    #[error("Unexpected end of symbol '{symbol}' while parsing {context}")]
    UnexpectedEnd { symbol: String, context: &'static str },

    #[error("Expected '{expected}' at offset {offset} in symbol '{symbol}', found '{found}'")]
    UnexpectedCharacter {
        symbol: String,
        offset: usize,
        expected: char,
        found: char,
    },

    #[error("Empty identifier at offset {offset} in symbol '{symbol}'")]
    EmptyIdentifier { symbol: String, offset: usize },

    #[error("Invalid descriptor suffix '{found}' at offset {offset} in symbol '{symbol}'")]
    InvalidSuffix {
        symbol: String,
        offset: usize,
        found: char,
    },

    #[error("Symbol '{symbol}' has no descriptors")]
    MissingDescriptors { symbol: String },
}

/// Package coordinates of a global symbol. Empty fields were written as `.`.
///
/// Compared field by field, so fields containing spaces never collide.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Package {
    pub manager: String,
    pub name: String,
    pub version: String,
}

impl Package {
    /// Whether manager, name and version are all present.
    pub fn is_complete(&self) -> bool {
        !self.manager.is_empty() && !self.name.is_empty() && !self.version.is_empty()
    }
}

/// Kind of a descriptor, determined by its suffix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorSuffix {
    Namespace,
    Type,
    Term,
    Meta,
    Macro,
    Method,
    TypeParameter,
    Parameter,
    /// The identifier of a `local` symbol.
    Local,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub name: String,
    /// Only set for methods, e.g. `+1` in `overload(+1).`.
    pub disambiguator: String,
    pub suffix: DescriptorSuffix,
}

impl Descriptor {
    fn new(name: String, suffix: DescriptorSuffix) -> Self {
        Self {
            name,
            disambiguator: String::new(),
            suffix,
        }
    }
}

/// A parsed symbol. Kept apart from the raw symbol string, which remains the
/// lookup key everywhere else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub scheme: String,
    pub package: Package,
    pub descriptors: Vec<Descriptor>,
}

impl Symbol {
    /// Parse a complete symbol, descriptors included.
    pub fn parse(symbol: &str) -> Result<Self, SymbolError> {
        SymbolParser::new(symbol).parse(true)
    }

    /// Parse the scheme and package only, ignoring whatever follows.
    pub fn parse_partial(symbol: &str) -> Result<Self, SymbolError> {
        SymbolParser::new(symbol).parse(false)
    }

    pub fn is_local(&self) -> bool {
        self.scheme == LOCAL_SCHEME
    }
}

struct SymbolParser<'a> {
    symbol: &'a str,
    chars: Vec<char>,
    index: usize,
}

impl<'a> SymbolParser<'a> {
    fn new(symbol: &'a str) -> Self {
        Self {
            symbol,
            chars: symbol.chars().collect(),
            index: 0,
        }
    }

    fn parse(mut self, include_descriptors: bool) -> Result<Symbol, SymbolError> {
        let scheme = self.accept_space_escaped_identifier("scheme")?;
        if scheme == LOCAL_SCHEME {
            let id: String = self.chars[self.index..].iter().collect();
            if id.is_empty() {
                return Err(SymbolError::EmptyIdentifier {
                    symbol: self.symbol.to_string(),
                    offset: self.index,
                });
            }
            return Ok(Symbol {
                scheme,
                package: Package::default(),
                descriptors: vec![Descriptor::new(id, DescriptorSuffix::Local)],
            });
        }

        let manager = self.accept_package_field("package manager")?;
        let name = self.accept_package_field("package name")?;
        let version = self.accept_package_field("package version")?;
        let package = Package {
            manager,
            name,
            version,
        };

        let descriptors = if include_descriptors {
            self.parse_descriptors()?
        } else {
            Vec::new()
        };

        Ok(Symbol {
            scheme,
            package,
            descriptors,
        })
    }

    fn accept_package_field(&mut self, context: &'static str) -> Result<String, SymbolError> {
        let value = self.accept_space_escaped_identifier(context)?;
        Ok(if value == "." { String::new() } else { value })
    }

    /// Read up to the next single space and consume it. Two spaces in a row
    /// encode one literal space.
    fn accept_space_escaped_identifier(
        &mut self,
        context: &'static str,
    ) -> Result<String, SymbolError> {
        let mut out = String::new();
        while let Some(&c) = self.chars.get(self.index) {
            if c == ' ' {
                if self.chars.get(self.index + 1) == Some(&' ') {
                    out.push(' ');
                    self.index += 2;
                    continue;
                }
                self.index += 1;
                return Ok(out);
            }
            out.push(c);
            self.index += 1;
        }
        Err(self.unexpected_end(context))
    }

    fn parse_descriptors(&mut self) -> Result<Vec<Descriptor>, SymbolError> {
        let mut descriptors = Vec::new();
        while self.index < self.chars.len() {
            descriptors.push(self.parse_descriptor()?);
        }
        if descriptors.is_empty() {
            return Err(SymbolError::MissingDescriptors {
                symbol: self.symbol.to_string(),
            });
        }
        Ok(descriptors)
    }

    fn parse_descriptor(&mut self) -> Result<Descriptor, SymbolError> {
        match self.peek() {
            Some('(') => {
                self.index += 1;
                let name = self.accept_identifier("parameter name")?;
                self.accept_character(')', "parameter")?;
                Ok(Descriptor::new(name, DescriptorSuffix::Parameter))
            }
            Some('[') => {
                self.index += 1;
                let name = self.accept_identifier("type parameter name")?;
                self.accept_character(']', "type parameter")?;
                Ok(Descriptor::new(name, DescriptorSuffix::TypeParameter))
            }
            _ => {
                let name = self.accept_identifier("descriptor name")?;
                let offset = self.index;
                let suffix = self
                    .peek()
                    .ok_or_else(|| self.unexpected_end("descriptor suffix"))?;
                self.index += 1;
                let suffix = match suffix {
                    '/' => DescriptorSuffix::Namespace,
                    '#' => DescriptorSuffix::Type,
                    '.' => DescriptorSuffix::Term,
                    ':' => DescriptorSuffix::Meta,
                    '!' => DescriptorSuffix::Macro,
                    '(' => {
                        let disambiguator = self.accept_simple_identifier_or_empty();
                        self.accept_character(')', "method disambiguator")?;
                        self.accept_character('.', "method")?;
                        return Ok(Descriptor {
                            name,
                            disambiguator,
                            suffix: DescriptorSuffix::Method,
                        });
                    }
                    found => {
                        return Err(SymbolError::InvalidSuffix {
                            symbol: self.symbol.to_string(),
                            offset,
                            found,
                        })
                    }
                };
                Ok(Descriptor::new(name, suffix))
            }
        }
    }

    fn accept_identifier(&mut self, context: &'static str) -> Result<String, SymbolError> {
        if self.peek() == Some('`') {
            return self.accept_escaped_identifier(context);
        }
        let start = self.index;
        let name = self.accept_simple_identifier_or_empty();
        if name.is_empty() {
            return Err(SymbolError::EmptyIdentifier {
                symbol: self.symbol.to_string(),
                offset: start,
            });
        }
        Ok(name)
    }

    fn accept_simple_identifier_or_empty(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !is_identifier_character(c) {
                break;
            }
            out.push(c);
            self.index += 1;
        }
        out
    }

    /// Backtick-quoted identifier; a doubled backtick is a literal backtick.
    fn accept_escaped_identifier(&mut self, context: &'static str) -> Result<String, SymbolError> {
        let start = self.index;
        self.index += 1;
        let mut out = String::new();
        loop {
            match self.peek() {
                None => return Err(self.unexpected_end(context)),
                Some('`') => {
                    if self.chars.get(self.index + 1) == Some(&'`') {
                        out.push('`');
                        self.index += 2;
                        continue;
                    }
                    self.index += 1;
                    break;
                }
                Some(c) => {
                    out.push(c);
                    self.index += 1;
                }
            }
        }
        if out.is_empty() {
            return Err(SymbolError::EmptyIdentifier {
                symbol: self.symbol.to_string(),
                offset: start,
            });
        }
        Ok(out)
    }

    fn accept_character(&mut self, expected: char, context: &'static str) -> Result<(), SymbolError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.index += 1;
                Ok(())
            }
            Some(found) => Err(SymbolError::UnexpectedCharacter {
                symbol: self.symbol.to_string(),
                offset: self.index,
                expected,
                found,
            }),
            None => Err(self.unexpected_end(context)),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn unexpected_end(&self, context: &'static str) -> SymbolError {
        SymbolError::UnexpectedEnd {
            symbol: self.symbol.to_string(),
            context,
        }
    }
}

fn is_identifier_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_detection() {
        assert!(is_local_symbol("local 42"));
        assert!(!is_local_symbol("localhost maven a 1.0 A#"));
        assert!(is_global_symbol("scip-ts npm pkg 1.0 a/"));
    }

    #[test]
    fn test_parse_global_symbol() {
        let symbol = Symbol::parse("scip-java maven com.example:lib 1.2.3 com/example/Foo#bar().").unwrap();
        assert_eq!(symbol.scheme, "scip-java");
        assert_eq!(symbol.package.manager, "maven");
        assert_eq!(symbol.package.name, "com.example:lib");
        assert_eq!(symbol.package.version, "1.2.3");
        assert!(symbol.package.is_complete());

        let suffixes: Vec<_> = symbol.descriptors.iter().map(|d| d.suffix).collect();
        assert_eq!(
            suffixes,
            vec![
                DescriptorSuffix::Namespace,
                DescriptorSuffix::Namespace,
                DescriptorSuffix::Type,
                DescriptorSuffix::Method,
            ]
        );
        assert_eq!(symbol.descriptors[3].name, "bar");
    }

    #[test]
    fn test_parse_every_descriptor_kind() {
        let symbol = Symbol::parse(
            "rust-analyzer cargo std 1.0 io/Read#read(+1).[T](buf)VALUE.meta:println!",
        )
        .unwrap();
        let descriptors = &symbol.descriptors;
        assert_eq!(descriptors[2].suffix, DescriptorSuffix::Method);
        assert_eq!(descriptors[2].disambiguator, "+1");
        assert_eq!(descriptors[3].suffix, DescriptorSuffix::TypeParameter);
        assert_eq!(descriptors[3].name, "T");
        assert_eq!(descriptors[4].suffix, DescriptorSuffix::Parameter);
        assert_eq!(descriptors[4].name, "buf");
        assert_eq!(descriptors[5].suffix, DescriptorSuffix::Term);
        assert_eq!(descriptors[6].suffix, DescriptorSuffix::Meta);
        assert_eq!(descriptors[7].suffix, DescriptorSuffix::Macro);
        assert_eq!(descriptors[7].name, "println");
    }

    #[test]
    fn test_dot_means_empty_package_field() {
        let symbol = Symbol::parse("lsif-go . . . main/foo().").unwrap();
        assert_eq!(symbol.package, Package::default());
        assert!(!symbol.package.is_complete());
    }

    #[test]
    fn test_space_escaping() {
        let symbol = Symbol::parse_partial("my  scheme npm my  pkg 1.0 ").unwrap();
        assert_eq!(symbol.scheme, "my scheme");
        assert_eq!(symbol.package.name, "my pkg");
        assert!(symbol.descriptors.is_empty());
    }

    #[test]
    fn test_backtick_escaping() {
        let symbol = Symbol::parse("scip-ts npm pkg 1.0 `weird name``s`#").unwrap();
        assert_eq!(symbol.descriptors[0].name, "weird name`s");
        assert_eq!(symbol.descriptors[0].suffix, DescriptorSuffix::Type);
    }

    #[test]
    fn test_parse_local_symbol() {
        let symbol = Symbol::parse("local 12").unwrap();
        assert!(symbol.is_local());
        assert_eq!(symbol.descriptors[0].name, "12");
        assert_eq!(symbol.descriptors[0].suffix, DescriptorSuffix::Local);
    }

    #[test]
    fn test_partial_parse_ignores_descriptors() {
        let symbol = Symbol::parse_partial("scip-ts npm pkg 1.0 ???").unwrap();
        assert_eq!(
            symbol.package,
            Package {
                manager: "npm".to_string(),
                name: "pkg".to_string(),
                version: "1.0".to_string(),
            }
        );
        assert!(Symbol::parse("scip-ts npm pkg 1.0 ???").is_err());
    }

    #[test]
    fn test_truncated_symbols_fail() {
        assert!(matches!(
            Symbol::parse_partial("pkg X#foo()."),
            Err(SymbolError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            Symbol::parse("scip-ts npm pkg 1.0 "),
            Err(SymbolError::MissingDescriptors { .. })
        ));
        assert!(matches!(
            Symbol::parse("scip-ts npm pkg 1.0 foo(bar"),
            Err(SymbolError::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            Symbol::parse("scip-ts npm pkg 1.0 foo%"),
            Err(SymbolError::InvalidSuffix { found: '%', .. })
        ));
    }

    #[test]
    fn test_empty_scheme() {
        let symbol = Symbol::parse_partial(" npm pkg 1.0 a.").unwrap();
        assert!(symbol.scheme.is_empty());
    }
}

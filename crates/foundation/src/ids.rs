//! Identities shared by the overlay and geometry crates.
//!
//! A classifier key names the CSS construct a toggle controls. Its string
//! form (`class_X`, `id_X`, `selector_X`) is what the menu and the style map
//! are keyed by; its selector form (`.X`, `#X`, `X`) is what ends up in the
//! stylesheet. Both directions live here so no call site does string surgery.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassifierKind {
    Class,
    Id,
    Selector,
}

impl ClassifierKind {
    /// Lookup order used when a node carries more than one classifier.
    pub const ALL: [ClassifierKind; 3] = [
        ClassifierKind::Class,
        ClassifierKind::Id,
        ClassifierKind::Selector,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            ClassifierKind::Class => "class",
            ClassifierKind::Id => "id",
            ClassifierKind::Selector => "selector",
        }
    }

    pub fn combinator(self) -> &'static str {
        match self {
            ClassifierKind::Class => ".",
            ClassifierKind::Id => "#",
            ClassifierKind::Selector => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    UnknownPrefix(String),
    EmptyName,
}

impl fmt::Display for KeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseError::UnknownPrefix(raw) => write!(f, "unknown classifier prefix: {raw}"),
            KeyParseError::EmptyName => write!(f, "classifier name is empty"),
        }
    }
}

impl std::error::Error for KeyParseError {}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassifierKey {
    kind: ClassifierKind,
    name: String,
}

impl ClassifierKey {
    pub fn new(kind: ClassifierKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(ClassifierKind::Class, name)
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::new(ClassifierKind::Id, name)
    }

    pub fn selector(name: impl Into<String>) -> Self {
        Self::new(ClassifierKind::Selector, name)
    }

    pub fn kind(&self) -> ClassifierKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `class_door` -> `.door`, `id_grid` -> `#grid`, `selector_polygon.x` -> `polygon.x`.
    pub fn to_css_selector(&self) -> String {
        format!("{}{}", self.kind.combinator(), self.name)
    }

    /// Inverse of [`ClassifierKey::to_css_selector`].
    ///
    /// Anything that does not start with `.` or `#` decodes as a raw selector.
    pub fn from_css_selector(selector: &str) -> Result<Self, KeyParseError> {
        let (kind, name) = if let Some(rest) = selector.strip_prefix('.') {
            (ClassifierKind::Class, rest)
        } else if let Some(rest) = selector.strip_prefix('#') {
            (ClassifierKind::Id, rest)
        } else {
            (ClassifierKind::Selector, selector)
        };
        if name.is_empty() {
            return Err(KeyParseError::EmptyName);
        }
        Ok(Self::new(kind, name))
    }
}

impl fmt::Display for ClassifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.prefix(), self.name)
    }
}

impl FromStr for ClassifierKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for kind in ClassifierKind::ALL {
            let Some(rest) = s.strip_prefix(kind.prefix()) else {
                continue;
            };
            let Some(name) = rest.strip_prefix('_') else {
                continue;
            };
            if name.is_empty() {
                return Err(KeyParseError::EmptyName);
            }
            return Ok(Self::new(kind, name));
        }
        Err(KeyParseError::UnknownPrefix(s.to_string()))
    }
}

/// Id of a boundary element (line, door, side) in the level document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectorId(pub String);

impl ConnectorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PolygonId(pub String);

impl PolygonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

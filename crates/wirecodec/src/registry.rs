//! Codec lookup by message type name.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{Codec, CodecConfig, CodecError, MessageLayout};

/// Holds one [`Codec`] per registered message type.
///
/// Lookups accept the fully-qualified type name or, when it is unique, the
/// short name without the package prefix.
#[derive(Debug, Default, Clone)]
pub struct CodecRegistry {
    codecs: BTreeMap<&'static str, Codec>,
    config: CodecConfig,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose codecs are all built with `config`.
    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            codecs: BTreeMap::new(),
            config,
        }
    }

    /// Validates `layout` and registers a codec for it, replacing any codec
    /// already registered under the same type name.
    pub fn register(&mut self, layout: &'static MessageLayout) -> Result<(), CodecError> {
        layout.validate()?;
        debug!(message = layout.type_name, "registered codec");
        self.codecs
            .insert(layout.type_name, Codec::with_config(layout, self.config));
        Ok(())
    }

    /// Builder form of [`CodecRegistry::register`].
    pub fn with(mut self, layout: &'static MessageLayout) -> Result<Self, CodecError> {
        self.register(layout)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&Codec, CodecError> {
        if let Some(codec) = self.codecs.get(name) {
            return Ok(codec);
        }
        let mut short = self
            .codecs
            .values()
            .filter(|codec| codec.layout().short_name() == name);
        match (short.next(), short.next()) {
            (Some(codec), None) => Ok(codec),
            _ => Err(CodecError::UnknownMessageType(name.to_owned())),
        }
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldKind, FieldLayout};

    static A: MessageLayout = MessageLayout::new(
        "pkg.one.Thing",
        &[FieldLayout::singular(1, "x", FieldKind::Bool)],
    );
    static B: MessageLayout = MessageLayout::new(
        "pkg.two.Thing",
        &[FieldLayout::singular(1, "y", FieldKind::Bool)],
    );
    static C: MessageLayout = MessageLayout::new(
        "pkg.one.Other",
        &[FieldLayout::singular(1, "z", FieldKind::Bool)],
    );
    static BROKEN: MessageLayout = MessageLayout::new(
        "pkg.Broken",
        &[
            FieldLayout::singular(1, "a", FieldKind::Bool),
            FieldLayout::singular(1, "b", FieldKind::Bool),
        ],
    );

    #[test]
    fn test_lookup_by_full_and_short_name() {
        let registry = CodecRegistry::new().with(&A).unwrap().with(&C).unwrap();
        assert_eq!(registry.get("pkg.one.Thing").unwrap().type_name(), "pkg.one.Thing");
        assert_eq!(registry.get("Other").unwrap().type_name(), "pkg.one.Other");
        assert_eq!(
            registry.get("Missing").unwrap_err(),
            CodecError::UnknownMessageType("Missing".to_owned())
        );
    }

    #[test]
    fn test_ambiguous_short_name() {
        let registry = CodecRegistry::new().with(&A).unwrap().with(&B).unwrap();
        assert!(registry.get("Thing").is_err());
        assert!(registry.get("pkg.two.Thing").is_ok());
        assert_eq!(
            registry.type_names().collect::<Vec<_>>(),
            ["pkg.one.Thing", "pkg.two.Thing"]
        );
    }

    #[test]
    fn test_register_rejects_invalid_layout() {
        let mut registry = CodecRegistry::new();
        assert!(matches!(
            registry.register(&BROKEN),
            Err(CodecError::InvalidLayout { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = CodecRegistry::new();
        registry.register(&A).unwrap();
        registry.register(&A).unwrap();
        assert_eq!(registry.len(), 1);
    }
}

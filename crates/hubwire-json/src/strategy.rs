//! Naming and enum conversion strategies.

use std::borrow::Cow;

use crate::naming::to_wire_name;

/// Hooks the serializer consults while walking a value.
///
/// The default methods reproduce plain serde behaviour: member names and enum
/// variants are written verbatim and enum strings must match a variant exactly.
pub trait Strategy: Send + Sync {
    /// Wire name for a struct member.
    fn member_name(&self, member: &str) -> String {
        member.to_owned()
    }

    /// Wire value for a unit enum variant.
    fn enum_name(&self, variant: &str) -> String {
        variant.to_owned()
    }

    /// Resolve a wire string to one of `variants`.
    ///
    /// `nullable` is set when the enum sits inside an `Option`.
    fn enum_variant(
        &self,
        value: &str,
        variants: &'static [&'static str],
        nullable: bool,
    ) -> Option<&'static str> {
        let _ = nullable;
        variants.iter().copied().find(|variant| *variant == value)
    }
}

/// Plain serde behaviour, no renaming.
#[derive(Debug, Clone, Copy, Default)]
pub struct PocoStrategy;

impl Strategy for PocoStrategy {}

/// The conventions of the GitHub REST API.
///
/// - members are mapped with [`to_wire_name`]
/// - unit variants are written lowercase
/// - enum strings match case-insensitively (Unicode lowercase, the same
///   mapping used when writing), with `-` removed first
///
/// The `-` removal only applies to bare enums. An `Option<E>` matches the
/// string as received, so `"private-repo"` decodes into `E` but not into
/// `Option<E>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitHubStrategy;

impl Strategy for GitHubStrategy {
    fn member_name(&self, member: &str) -> String {
        to_wire_name(member)
    }

    fn enum_name(&self, variant: &str) -> String {
        variant.to_lowercase()
    }

    fn enum_variant(
        &self,
        value: &str,
        variants: &'static [&'static str],
        nullable: bool,
    ) -> Option<&'static str> {
        let value = if nullable {
            Cow::Borrowed(value)
        } else {
            Cow::Owned(value.replace('-', ""))
        };

        variants
            .iter()
            .copied()
            .find(|variant| variant.to_lowercase() == value.to_lowercase())
    }
}

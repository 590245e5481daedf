//! Sundae building rules
//!
//! The draft a customer assembles in the "monte seu sundae" flow, plus the
//! parsing rules for chef replies in the `Nome|Descrição` format. The chef
//! reply format is not contractually guaranteed, so parsing degrades rather
//! than fails: a missing separator turns the whole reply into a description
//! under a generic name, and a blank reply falls back to the surprise name.

use crate::{cart::CustomItem, money};

/// Default display name for a sundae the customer never asked to name.
pub const DEFAULT_SUNDAE_NAME: &str = "Sundae Personalizado";

/// Name used when the chef reply has no `|` separator.
pub const GENERIC_MAGIC_NAME: &str = "Criação Mágica";

/// Name used when the chef reply is unusable.
pub const SURPRISE_NAME: &str = "Sundae Surpresa";

/// Fixed price of a built sundae, in centavos.
pub const SUNDAE_PRICE_MINOR: i64 = 22_90;

/// The three customer-chosen attributes of a sundae.
///
/// Exact equality of the triple is the merge identity for custom cart lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SundaeSelection {
    /// Ice cream base flavour.
    pub base: String,

    /// Syrup poured over the base.
    pub syrup: String,

    /// Extra topping.
    pub extra: String,
}

impl SundaeSelection {
    /// Creates a selection from the three attributes.
    pub fn new(
        base: impl Into<String>,
        syrup: impl Into<String>,
        extra: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            syrup: syrup.into(),
            extra: extra.into(),
        }
    }

    /// Attribute-derived description: `"{base} com {syrup} e {extra}"`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} com {} e {}", self.base, self.syrup, self.extra)
    }
}

impl Default for SundaeSelection {
    fn default() -> Self {
        Self::new("Chocolate", "Caramelo", "Granulado")
    }
}

/// An AI-generated name and description pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicName {
    /// Short playful sundae name.
    pub name: String,

    /// One-line description; may be empty when the reply was unusable.
    pub description: String,
}

/// Transient state of an in-progress sundae. Not part of the cart;
/// discarded when the builder closes or commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SundaeDraft {
    /// Current attribute selection.
    pub selection: SundaeSelection,

    /// Generated name/description, if the customer asked for one.
    pub magic: Option<MagicName>,
}

impl SundaeDraft {
    /// Display name: the generated one if present, the builder default otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.magic
            .as_ref()
            .map_or(DEFAULT_SUNDAE_NAME, |magic| magic.name.as_str())
    }

    /// Description: the generated one if non-empty, the attribute fallback otherwise.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.magic {
            Some(magic) if !magic.description.is_empty() => magic.description.clone(),
            _ => self.selection.describe(),
        }
    }

    /// Builds the cart item for this draft at the fixed builder price.
    #[must_use]
    pub fn into_custom_item(self) -> CustomItem {
        CustomItem {
            name: self.display_name().to_string(),
            description: self.description(),
            price: money::brl(SUNDAE_PRICE_MINOR),
            selection: self.selection,
        }
    }
}

/// Parses a chef reply expected in the `Nome|Descrição` format.
///
/// Split happens on the first `|`; the name side is trimmed and stripped of
/// `**` markdown emphasis. Degradations: no separator or an empty name side
/// yields [`GENERIC_MAGIC_NAME`] with the reply as description; a blank
/// reply yields [`SURPRISE_NAME`].
#[must_use]
pub fn parse_magic_reply(reply: &str) -> MagicName {
    let reply = reply.trim();

    if reply.is_empty() {
        return MagicName {
            name: SURPRISE_NAME.to_string(),
            description: String::new(),
        };
    }

    let Some((name, description)) = reply.split_once('|') else {
        return MagicName {
            name: GENERIC_MAGIC_NAME.to_string(),
            description: reply.to_string(),
        };
    };

    let name = name.trim().replace("**", "");
    let description = description.trim().to_string();

    if name.is_empty() {
        return MagicName {
            name: GENERIC_MAGIC_NAME.to_string(),
            description,
        };
    }

    MagicName { name, description }
}

//! Sundae builder service.
//!
//! Drives the `Closed -> Open -> (Naming)? -> Committed | Closed` flow:
//! collects the attribute selection, optionally asks the Chef Virtual for
//! a playful name, and hands the finished custom item to the cart. A chef
//! reply that lands after the builder was closed or reopened belongs to a
//! stale draft and is discarded.

use std::{fmt, sync::Arc};

use thiserror::Error;

use gelateria::{
    cart::{Cart, LineItemId},
    sundae::{self, SundaeDraft, SundaeSelection},
};

use crate::chef::Chef;

/// Builder states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No draft in progress.
    Closed,

    /// A draft is being assembled.
    Open,

    /// A chef naming request is in flight.
    Naming,

    /// The draft was handed to the cart; the caller closes next.
    Committed,
}

/// Errors from builder operations.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// The operation requires an open builder.
    #[error("sundae builder is not open")]
    NotOpen,
}

/// The sundae builder.
pub struct SundaeBuilder {
    chef: Arc<dyn Chef>,
    state: BuilderState,
    draft: SundaeDraft,
    generation: u64,
}

impl fmt::Debug for SundaeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SundaeBuilder")
            .field("state", &self.state)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl SundaeBuilder {
    /// Creates a closed builder backed by the given chef.
    #[must_use]
    pub fn new(chef: Arc<dyn Chef>) -> Self {
        Self {
            chef,
            state: BuilderState::Closed,
            draft: SundaeDraft::default(),
            generation: 0,
        }
    }

    /// Opens the builder with a fresh default draft.
    pub fn open(&mut self) {
        self.draft = SundaeDraft::default();
        self.state = BuilderState::Open;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Closes the builder, discarding the draft, from any state.
    pub fn close(&mut self) {
        self.draft = SundaeDraft::default();
        self.state = BuilderState::Closed;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Replaces the draft's attribute selection.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NotOpen`] unless the builder is open.
    pub fn select(&mut self, selection: SundaeSelection) -> Result<(), BuilderError> {
        if self.state != BuilderState::Open {
            return Err(BuilderError::NotOpen);
        }

        self.draft.selection = selection;

        Ok(())
    }

    /// Asks the chef for a playful name for the current selection and
    /// stores the parsed reply in the draft.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NotOpen`] unless the builder is open. The
    /// chef call itself never fails; unusable replies degrade through the
    /// parsing fallbacks.
    pub async fn request_magic_name(&mut self) -> Result<(), BuilderError> {
        if self.state != BuilderState::Open {
            return Err(BuilderError::NotOpen);
        }

        self.state = BuilderState::Naming;
        let generation = self.generation;
        let prompt = magic_name_prompt(&self.draft.selection);

        let reply = self.chef.complete(&prompt).await;

        self.apply_magic_reply(generation, &reply);

        Ok(())
    }

    fn apply_magic_reply(&mut self, generation: u64, reply: &str) {
        if generation != self.generation || self.state != BuilderState::Naming {
            tracing::debug!("discarding chef reply for a stale draft");
            return;
        }

        self.draft.magic = Some(sundae::parse_magic_reply(reply));
        self.state = BuilderState::Open;
    }

    /// Builds the custom item from the draft and hands it to the cart.
    /// Allowed while a naming request is still in flight; the late reply
    /// is then discarded when the caller closes the builder.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::NotOpen`] when the builder is closed or
    /// already committed.
    pub fn commit(&mut self, cart: &mut Cart) -> Result<LineItemId, BuilderError> {
        if !matches!(self.state, BuilderState::Open | BuilderState::Naming) {
            return Err(BuilderError::NotOpen);
        }

        let item = std::mem::take(&mut self.draft).into_custom_item();
        let id = cart.add_custom_item(item);

        self.state = BuilderState::Committed;

        Ok(id)
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// The draft being assembled.
    #[must_use]
    pub fn draft(&self) -> &SundaeDraft {
        &self.draft
    }
}

/// Prompt template for magic sundae names, embedding the selection and the
/// `Nome|Descrição` response-format instruction.
#[must_use]
pub fn magic_name_prompt(selection: &SundaeSelection) -> String {
    format!(
        "Você é um sorveteiro criativo. Crie um nome mágico, curto (max 4 \
         palavras) e divertido, e uma descrição de 1 linha para um sundae \
         com: Base {}, Calda {}, Extra {}. Formato de resposta: \
         Nome|Descrição. Idioma: Português.",
        selection.base, selection.syrup, selection.extra
    )
}

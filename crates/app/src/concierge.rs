//! AI chef concierge.
//!
//! Menu suggestions for an undecided customer, answered by the Chef
//! Virtual in one short, sweet-toned reply.

use thiserror::Error;

use gelateria::catalog::Catalog;

use crate::chef::Chef;

/// Errors from the concierge flow.
#[derive(Debug, Error)]
pub enum ConciergeError {
    /// The customer request was blank; rejected before any remote call.
    #[error("customer request is empty")]
    EmptyRequest,
}

/// Builds the concierge prompt over the current menu. Toppings are left
/// out; the chef suggests scoops or a sundae combination.
#[must_use]
pub fn suggestion_prompt(catalog: &Catalog, customer_request: &str) -> String {
    let menu: Vec<&str> = catalog
        .iter()
        .filter(|product| !product.tags.contains("topping"))
        .map(|product| product.name.as_str())
        .collect();

    format!(
        "Você é um chef especialista da 'Gelateria Pastel'. O cliente diz: \
         '{customer_request}'. Sugira APENAS UMA opção do nosso menu ({menu}) \
         OU uma combinação de sundae. Seja curto (máx 2 frases), doce e \
         acolhedor. Use emojis. Idioma: Português.",
        menu = menu.join(", ")
    )
}

/// Asks the chef for a single menu suggestion.
///
/// # Errors
///
/// Returns [`ConciergeError::EmptyRequest`] when the customer request is
/// blank. The chef call itself never fails; fallback replies come back as
/// ordinary strings.
pub async fn suggest(
    chef: &dyn Chef,
    catalog: &Catalog,
    customer_request: &str,
) -> Result<String, ConciergeError> {
    let customer_request = customer_request.trim();

    if customer_request.is_empty() {
        return Err(ConciergeError::EmptyRequest);
    }

    Ok(chef
        .complete(&suggestion_prompt(catalog, customer_request))
        .await)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use gelateria::fixtures;

    use crate::chef::MockChef;

    use super::*;

    #[test]
    fn prompt_lists_scoops_but_not_toppings() -> TestResult {
        let catalog = fixtures::builtin_menu()?;

        let prompt = suggestion_prompt(&catalog, "quero algo refrescante");

        assert!(prompt.contains("Pastel Dream, Dark Pistachio, Berry Blast, Choco Belga"));
        assert!(!prompt.contains("Cesta de Waffle"));
        assert!(prompt.contains("quero algo refrescante"));

        Ok(())
    }

    #[tokio::test]
    async fn blank_requests_are_rejected_before_any_call() -> TestResult {
        let catalog = fixtures::builtin_menu()?;
        let chef = MockChef::new();

        let result = suggest(&chef, &catalog, "   ").await;

        assert!(
            matches!(result, Err(ConciergeError::EmptyRequest)),
            "expected EmptyRequest, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn returns_the_chef_reply_verbatim() -> TestResult {
        let catalog = fixtures::builtin_menu()?;

        let mut chef = MockChef::new();
        chef.expect_complete()
            .returning(|_| "Experimente o Berry Blast! 🍓".to_string());

        let reply = suggest(&chef, &catalog, "algo leve").await?;

        assert_eq!(reply, "Experimente o Berry Blast! 🍓");

        Ok(())
    }
}

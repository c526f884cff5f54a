// src/chat/prompt.rs

use crate::models::chat::CollectionResults;

/// Prompt de sistema enviado ao modelo, com os documentos encontrados em JSON.
pub fn system_prompt(db_results: &[CollectionResults], user_input: &str) -> Result<String, serde_json::Error> {
    let db_context = serde_json::to_string_pretty(db_results)?;

    Ok(format!(
        "Vous êtes un assistant spécialisé dans l'art, expert de la galerie.

Contexte de la base de données :
{db_context}

Question de l'utilisateur : {user_input}

Instructions :
1. Répondez uniquement en utilisant les informations de la base de données
2. Utilisez un français professionnel et le vouvoiement
3. Utilisez la terminologie précise du monde de l'art
4. Respectez la typographie française (espace avant : ! ? ;)

Réponse :"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Collection;
    use serde_json::json;

    #[test]
    fn prompt_embeds_results_and_question() {
        let results = vec![CollectionResults {
            collection: Collection::Artistes,
            documents: vec![json!({ "nom": "Camille Martin" })],
        }];

        let prompt = system_prompt(&results, "Qui est représenté ?").unwrap();
        assert!(prompt.contains("\"collection\": \"artistes\""));
        assert!(prompt.contains("\"nom\": \"Camille Martin\""));
        assert!(prompt.contains("Question de l'utilisateur : Qui est représenté ?"));
    }
}

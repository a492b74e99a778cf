use crate::llm::Translator;

use super::{format_translation, raw_for_display};

pub(super) async fn translate(translator: &Translator, query: &str) -> anyhow::Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Natural language request must not be empty");
    }

    match translator.translate(query).await {
        Ok(translation) => {
            print!("{}", format_translation(&translation));
            Ok(())
        }
        Err(e) => {
            if let Some(raw) = raw_for_display(&e) {
                println!("AI raw: {raw}");
            }
            Err(e.into())
        }
    }
}

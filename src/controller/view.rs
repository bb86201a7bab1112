use crate::models::{AnalysisResult, Category};

pub const PRODUCTIVE_CAPTION: &str = "Requer ação ou resposta";
pub const UNPRODUCTIVE_CAPTION: &str = "Não requer ação imediata";

/// Display data for a successful analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView<'a> {
    /// Selects the badge style
    pub category: Category,
    /// Upper-cased category label, e.g. `PRODUTIVO`
    pub label: String,
    pub caption: &'static str,
    pub reply: &'a str,
    pub processed_text: Option<&'a str>,
    pub original_length: Option<u64>,
}

pub fn render_result(result: &AnalysisResult) -> ResultView<'_> {
    let caption = match result.category {
        Category::Productive => PRODUCTIVE_CAPTION,
        Category::Unproductive => UNPRODUCTIVE_CAPTION,
    };

    ResultView {
        category: result.category,
        label: result.category_label.to_uppercase(),
        caption,
        reply: &result.suggested_reply,
        processed_text: result.processed_text.as_deref(),
        original_length: result.original_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_productive_view() {
        let result = AnalysisResult::success("Produtivo", "We will address this shortly.");
        let view = render_result(&result);

        assert_eq!(view.category, Category::Productive);
        assert_eq!(view.label, "PRODUTIVO");
        assert_eq!(view.caption, "Requer ação ou resposta");
        assert_eq!(view.reply, "We will address this shortly.");
    }

    #[test]
    fn test_unproductive_view() {
        let result = AnalysisResult::success("Improdutivo", "Obrigado!");
        let view = render_result(&result);

        assert_eq!(view.category, Category::Unproductive);
        assert_eq!(view.label, "IMPRODUTIVO");
        assert_eq!(view.caption, "Não requer ação imediata");
    }

    #[test]
    fn test_unknown_label_renders_as_unproductive() {
        let result = AnalysisResult::success("Spam", "-");
        let view = render_result(&result);

        assert_eq!(view.category, Category::Unproductive);
        assert_eq!(view.label, "SPAM");
        assert_eq!(view.caption, UNPRODUCTIVE_CAPTION);
    }

    #[test]
    fn test_label_uppercases_accents() {
        let result = AnalysisResult::success("ação", "-");
        assert_eq!(render_result(&result).label, "AÇÃO");
    }
}

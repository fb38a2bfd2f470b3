//! Markup of the forecast page, carrying every hook the views write into.

use crate::constants::PRECIPITATION_HOURS;
use crate::dom::{Document, NodeId, RenderTarget};
use crate::models::Period;
use crate::viewport::ViewportMode;

const PLACEHOLDER: &str = "--";

/// Builds the page the views render into, with placeholder content
pub fn default_document() -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    let html = doc.append_element(root, "html", &[("lang", "ja")]);

    let head = doc.append_element(html, "head", &[]);
    doc.append_element(head, "meta", &[("charset", "utf-8")]);
    let viewport = ViewportMode::Responsive.content();
    doc.append_element(
        head,
        "meta",
        &[("name", "viewport"), ("content", viewport.as_str())],
    );
    let title = doc.append_element(head, "title", &[]);
    doc.append_text(title, "東京の天気");

    let body = doc.append_element(html, "body", &[]);
    let cards = doc.append_element(body, "section", &[("class", "weather")]);
    for period in [Period::Today, Period::Tomorrow] {
        weather_card(&mut doc, cards, period);
    }

    let weekly = doc.append_element(body, "section", &[("class", "weekly-weather")]);
    let heading = doc.append_element(weekly, "h2", &[]);
    doc.append_text(heading, "週間天気");
    doc.append_element(
        weekly,
        "ul",
        &[("id", "js-weekly-weather-container"), ("class", "weekly-weather__list")],
    );
    let template = doc.append_element(weekly, "template", &[("id", "js-weekly-weather-template")]);
    weekly_card(&mut doc, template);

    doc
}

fn text_element(doc: &mut Document, parent: NodeId, tag: &str, class: &str, text: &str) -> NodeId {
    let node = doc.append_element(parent, tag, &[("class", class)]);
    doc.append_text(node, text);
    node
}

/// Value, diff and diff label for one of the two temperatures
fn temperature(doc: &mut Document, parent: NodeId, kind: &str, placeholder: &str) {
    let wrapper_class = format!("weather-temp-{kind}");
    let wrapper = doc.append_element(parent, "p", &[("class", wrapper_class.as_str())]);
    text_element(
        doc,
        wrapper,
        "span",
        &format!("js-weather-temp-{kind}-value"),
        placeholder,
    );
    doc.append_text(wrapper, "℃");
    let label_class = format!("js-weather-temp-{kind}-diff-label");
    let label = doc.append_element(wrapper, "span", &[("class", label_class.as_str())]);
    text_element(
        doc,
        label,
        "span",
        &format!("js-weather-temp-{kind}-diff"),
        placeholder,
    );
}

fn weather_card(doc: &mut Document, parent: NodeId, period: Period) {
    let card = doc.append_element(
        parent,
        "div",
        &[("class", "weather-card js-weather-card"), ("data-period", period.as_str())],
    );
    text_element(doc, card, "h2", "weather-card__title", period.label());
    text_element(doc, card, "p", "js-weather-telop", PLACEHOLDER);
    let icon = doc.append_element(card, "div", &[("class", "js-weather-icon")]);
    doc.append_element(icon, "img", &[("src", ""), ("alt", "")]);

    temperature(doc, card, "high", PLACEHOLDER);
    temperature(doc, card, "low", PLACEHOLDER);

    // compact summary repeats both values
    let summary = doc.append_element(card, "p", &[("class", "weather-card__summary")]);
    text_element(doc, summary, "span", "js-weather-temp-high-value", PLACEHOLDER);
    doc.append_text(summary, "/");
    text_element(doc, summary, "span", "js-weather-temp-low-value", PLACEHOLDER);

    let table = doc.append_element(card, "table", &[("class", "weather-precipitation")]);
    let row = doc.append_element(table, "tr", &[]);
    for hour in PRECIPITATION_HOURS {
        text_element(
            doc,
            row,
            "td",
            &format!("js-weather-precipitation-{hour}"),
            &format!("{PLACEHOLDER}%"),
        );
    }
}

fn weekly_card(doc: &mut Document, template: NodeId) {
    let item = doc.append_element(template, "li", &[("class", "weekly-card")]);
    doc.append_element(item, "h3", &[("class", "js-weather-title")]);
    doc.append_element(item, "p", &[("class", "js-weather-telop")]);
    let icon = doc.append_element(item, "div", &[("class", "js-weather-icon")]);
    doc.append_element(icon, "img", &[("src", ""), ("alt", ""), ("width", "40"), ("height", "27")]);
    temperature(doc, item, "high", "");
    temperature(doc, item, "low", "");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Selector;

    fn count(doc: &Document, scope: NodeId, selector: &str) -> usize {
        doc.query_all(scope, &Selector::parse(selector).unwrap()).len()
    }

    #[test]
    fn test_document_carries_all_hooks() {
        let doc = default_document();
        let root = doc.root();

        assert_eq!(count(&doc, root, "meta[name=\"viewport\"]"), 1);
        assert_eq!(count(&doc, root, ".js-weather-card"), 2);
        assert_eq!(count(&doc, root, "#js-weekly-weather-container"), 1);
        assert_eq!(count(&doc, root, "#js-weekly-weather-template"), 1);

        for period in [Period::Today, Period::Tomorrow] {
            let card = doc
                .query(root, &Selector::parse(&period.card_selector()).unwrap())
                .unwrap();
            assert_eq!(count(&doc, card, ".js-weather-temp-high-value"), 2);
            assert_eq!(count(&doc, card, ".js-weather-temp-low-diff-label"), 1);
            assert_eq!(count(&doc, card, ".js-weather-icon img"), 1);
            for hour in PRECIPITATION_HOURS {
                assert_eq!(
                    count(&doc, card, &format!(".js-weather-precipitation-{hour}")),
                    1
                );
            }
        }
    }

    #[test]
    fn test_template_has_single_root() {
        let mut doc = default_document();
        let template = doc
            .query(doc.root(), &Selector::parse("#js-weekly-weather-template").unwrap())
            .unwrap();
        let fragment = doc.instantiate_template(template);
        assert_eq!(doc.children(fragment).len(), 1);
        assert_eq!(count(&doc, fragment, ".js-weather-temp-low-diff-label"), 1);
    }
}

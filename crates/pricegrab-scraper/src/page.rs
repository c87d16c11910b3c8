//! Page-wide attributes shown alongside variants in detailed output.

use std::sync::LazyLock;

use pricegrab_core::CommonItem;
use scraper::{ElementRef, Html, Selector};

static FIRST_LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("valid li selector"));

/// Text found for one [`CommonItem`]. `value` is `None` when the item's
/// node selector matched nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonItemValue {
    pub name: String,
    pub value: Option<String>,
}

/// Looks up each configured common item on the page.
///
/// Inside the first `node` match, the first `child` match supplies the text;
/// failing that the first `li`, failing that an empty string. Selectors that
/// do not parse are treated as matching nothing.
#[must_use]
pub fn extract_common_items(document: &Html, items: &[CommonItem]) -> Vec<CommonItemValue> {
    items
        .iter()
        .map(|item| CommonItemValue {
            name: item.name.clone(),
            value: select_first(document.root_element(), &item.node)
                .map(|node| child_text(node, &item.child)),
        })
        .collect()
}

fn select_first<'a>(scope: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let Ok(parsed) = Selector::parse(selector) else {
        tracing::warn!(selector, "ignoring unparseable selector");
        return None;
    };
    scope.select(&parsed).next()
}

fn child_text(node: ElementRef<'_>, child: &str) -> String {
    select_first(node, child)
        .or_else(|| node.select(&FIRST_LIST_ITEM).next())
        .map(normalize_text)
        .unwrap_or_default()
}

fn normalize_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::lang::{Language, Translatable};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct MenuData {
    pub categories: Vec<MenuCategory>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub category_id: String,
    #[serde(default)]
    pub bg_image: Option<String>,
    #[serde(default)]
    pub category_name_en: String,
    #[serde(default)]
    pub category_name_ar: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(deserialize_with = "price_text")]
    pub price: String,
}

// Prices are display strings, but data files sometimes carry bare numbers.
fn price_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Price::deserialize(deserializer)? {
        Price::Text(text) => text,
        Price::Number(number) => number.to_string(),
    })
}

impl MenuData {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translations {
    pub en: String,
    pub ar: String,
}

impl Translations {
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Ar => &self.ar,
        }
    }

    /// The string for `lang`, or the other language's when it has none.
    pub fn display(&self, lang: Language) -> &str {
        match self.get(lang) {
            "" => self.get(lang.toggled()),
            text => text,
        }
    }
}

/// A detached element description, materialized by a `Surface`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<&'static str>,
    pub styles: Vec<(&'static str, String)>,
    pub translations: Option<Translations>,
    /// Inner markup as displayed.
    pub content: String,
    /// Register with the reveal animator once mounted.
    pub reveal: bool,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            styles: Vec::new(),
            translations: None,
            content: String::new(),
            reveal: false,
            children: Vec::new(),
        }
    }

    fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    fn translated(mut self, en: &str, ar: &str, lang: Language) -> Self {
        let translations = Translations {
            en: en.to_string(),
            ar: ar.to_string(),
        };
        self.content = translations.display(lang).to_string();
        self.translations = Some(translations);
        self.classes.push("lang-aware");
        self
    }

    fn revealed(mut self) -> Self {
        self.reveal = true;
        self
    }

    fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ElementSpec)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut ElementSpec)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }
}

impl Translatable for ElementSpec {
    fn translation(&self, lang: Language) -> Option<String> {
        self.translations.as_ref().map(|t| t.get(lang).to_string())
    }

    fn set_content(&mut self, html: &str) {
        self.content = html.to_string();
    }
}

fn stagger_delay(index: usize, step_ms: u32) -> String {
    let delay_ms = (index as u64 + 1) * u64::from(step_ms);
    format!("{}s", delay_ms as f64 / 1000.0)
}

/// Expands the menu table into one container per category, with text in
/// `lang`.
pub fn render_menu(data: &MenuData, lang: Language, stagger_step_ms: u32) -> Vec<ElementSpec> {
    data.categories
        .iter()
        .enumerate()
        .map(|(index, category)| render_category(index, category, lang, stagger_step_ms))
        .collect()
}

fn render_category(
    index: usize,
    category: &MenuCategory,
    lang: Language,
    stagger_step_ms: u32,
) -> ElementSpec {
    let mut container = ElementSpec::new("div")
        .class("menu-category")
        .class("reveal-up")
        .revealed();
    container.id = Some(category.category_id.clone());
    container
        .styles
        .push(("transition-delay", stagger_delay(index, stagger_step_ms)));
    if let Some(bg) = category.bg_image.as_deref().filter(|bg| !bg.is_empty()) {
        container
            .styles
            .push(("background-image", format!("url('{}')", bg)));
    }

    let header = ElementSpec::new("h3")
        .translated(&category.category_name_en, &category.category_name_ar, lang)
        .revealed();
    container = container.child(header);

    for item in &category.items {
        let title = ElementSpec::new("h4")
            .translated(&item.name_en, &item.name_ar, lang)
            .revealed();
        let mut price = ElementSpec::new("span").class("price");
        price.content = item.price.clone();

        let head = ElementSpec::new("div")
            .class("item-head")
            .child(title)
            .child(price);
        container = container.child(
            ElementSpec::new("div")
                .class("menu-item")
                .revealed()
                .child(head),
        );
    }
    container
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::translate_all;

    const SAMPLE: &str = r#"[
        {
            "categoryId": "hot-drinks",
            "bgImage": "images/hot.jpg",
            "categoryNameEn": "Hot Drinks",
            "categoryNameAr": "مشروبات ساخنة",
            "items": [
                { "nameEn": "Espresso", "nameAr": "إسبريسو", "price": "12 SAR" },
                { "nameEn": "Spanish <em>Latte</em>", "nameAr": "سبانش لاتيه", "price": 18.5 }
            ]
        },
        {
            "categoryId": "desserts",
            "categoryNameEn": "Desserts",
            "categoryNameAr": "حلويات"
        }
    ]"#;

    fn rows(container: &ElementSpec) -> Vec<&ElementSpec> {
        container
            .children
            .iter()
            .filter(|c| c.has_class("menu-item"))
            .collect()
    }

    #[test]
    fn parses_page_data_shape() {
        let data = MenuData::from_json(SAMPLE).unwrap();
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.categories[0].items[1].price, "18.5");
        assert_eq!(data.categories[1].bg_image, None);
        assert!(data.categories[1].items.is_empty());
    }

    #[test]
    fn rejects_malformed_data() {
        assert!(MenuData::from_json(r#"[{"categoryId": 3}]"#).is_err());
    }

    #[test]
    fn renders_category_with_rows() {
        let data = MenuData::from_json(SAMPLE).unwrap();
        let rendered = render_menu(&data, Language::En, 100);
        assert_eq!(rendered.len(), 2);

        let hot = &rendered[0];
        assert_eq!(hot.id.as_deref(), Some("hot-drinks"));
        assert!(hot.has_class("menu-category") && hot.has_class("reveal-up"));
        assert_eq!(hot.style("background-image"), Some("url('images/hot.jpg')"));
        assert_eq!(hot.children[0].tag, "h3");
        assert_eq!(hot.children[0].content, "Hot Drinks");

        let rows = rows(hot);
        assert_eq!(rows.len(), 2);
        let head = &rows[1].children[0];
        assert_eq!(head.children[0].content, "Spanish <em>Latte</em>");
        assert_eq!(head.children[1].content, "18.5");
        assert!(head.children[1].translations.is_none());
    }

    #[test]
    fn missing_arabic_names_keep_the_table() {
        let data = MenuData::from_json(
            r#"[{
                "categoryId": "juices",
                "categoryNameEn": "Juices",
                "categoryNameAr": "",
                "items": [
                    { "nameEn": "Orange", "nameAr": "برتقال", "price": "10 SAR" },
                    { "nameEn": "Mango", "price": "12 SAR" }
                ]
            }]"#,
        )
        .unwrap();
        assert_eq!(data.categories[0].items[1].name_ar, "");

        let rendered = render_menu(&data, Language::Ar, 100);
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].children[0].content, "Juices");
        let rows = rows(&rendered[0]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].children[0].children[0].content, "برتقال");
        assert_eq!(rows[1].children[0].children[0].content, "Mango");
    }

    #[test]
    fn stagger_grows_with_position() {
        let data = MenuData::from_json(SAMPLE).unwrap();
        let rendered = render_menu(&data, Language::En, 100);
        assert_eq!(rendered[0].style("transition-delay"), Some("0.1s"));
        assert_eq!(rendered[1].style("transition-delay"), Some("0.2s"));
        assert_eq!(rendered[1].style("background-image"), None);
        assert_eq!(stagger_delay(2, 100), "0.3s");
        assert_eq!(stagger_delay(9, 100), "1s");
    }

    #[test]
    fn renders_in_current_language() {
        let data = MenuData::from_json(SAMPLE).unwrap();
        let rendered = render_menu(&data, Language::Ar, 100);
        assert_eq!(rendered[0].children[0].content, "مشروبات ساخنة");
        let price = &rows(&rendered[0])[0].children[0].children[1];
        assert_eq!(price.content, "12 SAR");
    }

    #[test]
    fn rendered_nodes_follow_language_switch() {
        let data = MenuData::from_json(SAMPLE).unwrap();
        let mut rendered = render_menu(&data, Language::En, 100);
        for container in &mut rendered {
            container.walk_mut(&mut |node| {
                translate_all(Language::Ar, std::iter::once(node));
            });
        }
        let mut mismatched = 0;
        for container in &rendered {
            container.walk(&mut |node| {
                if let Some(t) = &node.translations {
                    if node.content != t.ar {
                        mismatched += 1;
                    }
                }
            });
        }
        assert_eq!(mismatched, 0);
    }

    #[test]
    fn reveal_flags_cover_headers_rows_and_names() {
        let data = MenuData::from_json(SAMPLE).unwrap();
        let rendered = render_menu(&data, Language::En, 100);
        let mut tags = Vec::new();
        rendered[0].walk(&mut |node| {
            if node.reveal {
                tags.push(node.tag);
            }
        });
        assert_eq!(tags, vec!["div", "h3", "div", "h4", "div", "h4"]);
    }
}

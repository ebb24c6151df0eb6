use serde::{Deserialize, Serialize};

const SITE_JSON: &str = include_str!("../content/site.json");

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct SiteContent {
    pub brand: String,
    pub tagline: String,
    pub nav: Vec<NavEntry>,
    pub products: Vec<Product>,
    pub about: Vec<String>,
    pub gallery: Vec<GalleryImage>,
    pub contact: ContactInfo,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct NavEntry {
    pub label: String,
    pub href: String,
}

impl NavEntry {
    /// Section id for in-page links, `None` for links that leave the page.
    pub fn section_id(&self) -> Option<&str> {
        self.href.strip_prefix('#')
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Product {
    pub slug: String,
    pub name: String,
    pub summary: String,
    pub image: String,
    #[serde(default)]
    pub details: Vec<String>,
}

impl Product {
    pub fn detail_section_id(&self) -> String {
        detail_section_id(&self.slug)
    }
}

pub fn detail_section_id(product: &str) -> String {
    format!("{}-details", product)
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct GalleryImage {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ContactInfo {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl ContactInfo {
    pub fn phone_href(&self) -> String {
        let number: String = self
            .phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        format!("tel:{}", number)
    }

    pub fn whatsapp_href(&self) -> String {
        let digits: String = self.whatsapp.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("https://wa.me/{}", digits)
    }
}

impl SiteContent {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Content bundled into the binary at build time.
    pub fn bundled() -> Result<Self, serde_json::Error> {
        Self::parse(SITE_JSON)
    }

    /// Section ids reachable from an in-page nav link.
    pub fn nav_targets(&self) -> Vec<String> {
        self.nav
            .iter()
            .filter_map(|entry| entry.section_id().map(str::to_string))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_content_parses() {
        let site = SiteContent::bundled().expect("bundled site.json should parse");
        assert!(!site.gallery.is_empty());
        assert_eq!(site.products[0].detail_section_id(), "tables-details");
    }

    #[test]
    fn nav_targets_skip_external_links() {
        let site = SiteContent::bundled().unwrap();
        assert_eq!(
            site.nav_targets(),
            vec!["home", "products", "about", "gallery", "contact"]
        );
    }

    #[test]
    fn contact_links_strip_formatting() {
        let contact = ContactInfo {
            phone: "+44 20 7946 0958".into(),
            whatsapp: "+44 (7700) 900-123".into(),
            email: "x@y.z".into(),
            address: String::new(),
        };
        assert_eq!(contact.phone_href(), "tel:+442079460958");
        assert_eq!(contact.whatsapp_href(), "https://wa.me/447700900123");
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = r#"{
            "brand": "b", "tagline": "t", "nav": [], "about": [],
            "products": [{ "slug": "s", "name": "n", "summary": "", "image": "" }],
            "gallery": [{ "src": "/a.jpg" }],
            "contact": { "phone": "1", "whatsapp": "2", "email": "e" }
        }"#;
        let site = SiteContent::parse(raw).unwrap();
        assert!(site.products[0].details.is_empty());
        assert_eq!(site.gallery[0].alt, "");
        assert_eq!(site.contact.address, "");
    }
}

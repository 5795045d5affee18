//! Page composition root.
//!
//! [`PageShell::bootstrap`] runs once at startup: it checks the page template
//! for its mount point and the asset list for usable URLs, and refuses to
//! start otherwise. [`PageShell::mount`] then renders a component tree into
//! the mount point for every page served.

use scraper::node::Text;
use scraper::{Html, Node, Selector};
use url::Url;
use wt_core::{Error, Result};

pub const DEFAULT_MOUNT_ID: &str = "app";

pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="sw">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>WikiTrust Index</title>
</head>
<body>
<div id="app"></div>
</body>
</html>
"#;

/// Something that renders to an HTML fragment.
pub trait Component {
    fn render(&self) -> String;
}

/// Stylesheets go in `<head>`, scripts at the end of `<body>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSet {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
}

impl Default for AssetSet {
    fn default() -> Self {
        Self {
            stylesheets: vec![
                "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css"
                    .to_string(),
                "https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css"
                    .to_string(),
                "/static/style.css".to_string(),
            ],
            scripts: vec![
                "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"
                    .to_string(),
            ],
        }
    }
}

impl AssetSet {
    /// Every asset must be an absolute URL or a site-absolute path.
    pub fn validate(&self) -> Result<()> {
        for asset in self.stylesheets.iter().chain(&self.scripts) {
            let asset = asset.trim();
            let usable = if asset.starts_with('/') && !asset.starts_with("//") {
                asset.len() > 1
            } else {
                Url::parse(asset).is_ok()
            };
            if !usable {
                return Err(Error::Asset(format!("unusable asset URL: {:?}", asset)));
            }
        }
        Ok(())
    }

    fn head_tags(&self) -> String {
        self.stylesheets
            .iter()
            .map(|href| {
                format!("<link rel=\"stylesheet\" href=\"{}\">\n", crate::view::escape(href))
            })
            .collect()
    }

    fn body_tags(&self) -> String {
        self.scripts
            .iter()
            .map(|src| format!("<script src=\"{}\"></script>\n", crate::view::escape(src)))
            .collect()
    }
}

/// A page template split around its insertion points.
#[derive(Debug, Clone)]
pub struct PageShell {
    before_head_end: String,
    before_mount_content: String,
    before_body_end: String,
    rest: String,
    assets: AssetSet,
}

const HEAD_END_MARK: &str = "wt-shell-head-end";
const MOUNT_MARK: &str = "wt-shell-mount";
const BODY_END_MARK: &str = "wt-shell-body-end";

impl PageShell {
    /// Parses the template, finds the single element with `mount_id` inside
    /// `<body>`, and records where assets and the component tree go.
    pub fn bootstrap(template: &str, mount_id: &str, assets: AssetSet) -> Result<Self> {
        if mount_id.is_empty()
            || !mount_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::Mount(format!("invalid mount id {:?}", mount_id)));
        }
        assets.validate()?;
        for mark in [HEAD_END_MARK, MOUNT_MARK, BODY_END_MARK] {
            if template.contains(mark) {
                return Err(Error::Mount(format!("template must not contain {:?}", mark)));
            }
        }

        let mut document = Html::parse_document(template);
        let selector = Selector::parse(&format!("[id=\"{}\"]", mount_id))
            .map_err(|e| Error::Mount(format!("bad selector for {:?}: {:?}", mount_id, e)))?;
        let (mount, in_body) = {
            let found: Vec<_> = document.select(&selector).collect();
            if found.len() != 1 {
                return Err(Error::Mount(format!(
                    "expected one element with id {:?}, found {}",
                    mount_id,
                    found.len()
                )));
            }
            let in_body = found[0]
                .ancestors()
                .any(|node| node.value().as_element().map_or(false, |e| e.name() == "body"));
            (found[0].id(), in_body)
        };
        if !in_body {
            return Err(Error::Mount("mount point must sit inside <body>".to_string()));
        }
        let tag_id = |tag: &str| {
            Selector::parse(tag)
                .ok()
                .and_then(|selector| document.select(&selector).next().map(|el| el.id()))
                .ok_or_else(|| Error::Mount(format!("template has no <{}>", tag)))
        };
        let head = tag_id("head")?;
        let body = tag_id("body")?;

        for (id, mark) in [(head, HEAD_END_MARK), (body, BODY_END_MARK)] {
            let mut node = document
                .tree
                .get_mut(id)
                .ok_or_else(|| Error::Mount("template tree changed while mounting".to_string()))?;
            node.append(Node::Text(Text { text: mark.into() }));
        }
        document
            .tree
            .get_mut(mount)
            .ok_or_else(|| Error::Mount("template tree changed while mounting".to_string()))?
            .prepend(Node::Text(Text {
                text: MOUNT_MARK.into(),
            }));

        let page = document.html();
        let split = |text: &str, mark: &str| -> Result<(String, String)> {
            text.split_once(mark)
                .map(|(before, after)| (before.to_string(), after.to_string()))
                .ok_or_else(|| Error::Mount(format!("lost insertion point {:?}", mark)))
        };
        let (before_head_end, page) = split(&page, HEAD_END_MARK)?;
        let (before_mount_content, page) = split(&page, MOUNT_MARK)?;
        let (before_body_end, rest) = split(&page, BODY_END_MARK)?;

        tracing::info!("🧩 Page shell ready, mounting into #{}", mount_id);
        Ok(Self {
            before_head_end,
            before_mount_content,
            before_body_end,
            rest,
            assets,
        })
    }

    pub fn mount(&self, root: &dyn Component) -> String {
        let tree = root.render();
        let head = self.assets.head_tags();
        let scripts = self.assets.body_tags();
        let mut page = String::with_capacity(
            self.before_head_end.len()
                + self.before_mount_content.len()
                + self.before_body_end.len()
                + self.rest.len()
                + head.len()
                + tree.len()
                + scripts.len(),
        );
        page.push_str(&self.before_head_end);
        page.push_str(&head);
        page.push_str(&self.before_mount_content);
        page.push_str(&tree);
        page.push_str(&self.before_body_end);
        page.push_str(&scripts);
        page.push_str(&self.rest);
        page
    }
}

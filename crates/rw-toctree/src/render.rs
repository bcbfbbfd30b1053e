//! Navigation fragment rendering.
//!
//! Rendering is a pure function of the built tree, the current document,
//! and the [`RenderHelpers`] supplied by the host: the host decides how
//! titles are displayed and how links are made relative.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::TocError;
use crate::navigation::NavigationTree;
use crate::node::{Node, NodeId, Page};

/// Output format for [`NavigationTree::render`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderFormat {
    /// Nested `<ul>` lists with captions.
    #[default]
    Html,
    /// JSON array of section and page objects.
    Json,
}

/// Host callbacks used while rendering.
pub trait RenderHelpers: Send + Sync {
    /// Display title for a page.
    fn render_title(&self, page: &Page) -> String {
        page.title().to_owned()
    }

    /// Link from document `from` to document `to`.
    fn relative_link(&self, from: &str, to: &str) -> String {
        relative_path(from, to)
    }
}

/// Stored titles and RFC 3986 relative links.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRenderHelpers;

impl RenderHelpers for DefaultRenderHelpers {}

/// Compute a relative URL from one document slug to another.
///
/// Slugs name documents, not directories: `guide` and `guide/setup` are
/// siblings of different directories, so only the leading segments of
/// each slug are compared.
///
/// # Examples
///
/// ```
/// use rw_toctree::relative_path;
///
/// assert_eq!(relative_path("a/b", "a/c"), "c");
/// assert_eq!(relative_path("guide/setup", "guide"), "../guide");
/// assert_eq!(relative_path("index", "guide/setup"), "guide/setup");
/// ```
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let Some((name, to_dir)) = to_segs.split_last() else {
        return "./".to_owned();
    };
    // A trailing slash means `from` is itself a directory.
    let from_dir = if from.ends_with('/') {
        &from_segs[..]
    } else {
        from_segs.split_last().map_or(&[][..], |(_, dir)| dir)
    };

    let common = from_dir
        .iter()
        .zip(to_dir)
        .take_while(|(a, b)| a == b)
        .count();

    let mut link = "../".repeat(from_dir.len() - common);
    for segment in &to_dir[common..] {
        link.push_str(segment);
        link.push('/');
    }
    link.push_str(name);
    link
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Rendered navigation node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        children: Vec<NavNode>,
    },
    Page {
        title: String,
        link: String,
        external: bool,
        current: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<NavNode>,
    },
}

impl NavigationTree {
    /// Render the navigation as seen from `current`.
    ///
    /// Pages whose slug is in the configured exclude list are omitted, and
    /// nesting stops at the configured `max_depth`. Pages on the path to
    /// `current` are marked as current.
    pub fn render(&self, format: RenderFormat, current: &str) -> Result<String, TocError> {
        let nodes = self.nav_nodes(current);
        match format {
            RenderFormat::Html => {
                let mut html = String::from("<div class=\"toctree-wrapper\">\n");
                for node in &nodes {
                    write_html(&mut html, node, 1);
                }
                html.push_str("</div>\n");
                Ok(html)
            }
            RenderFormat::Json => Ok(serde_json::to_string(&nodes)?),
        }
    }

    /// Build the renderable node list for `current`.
    #[must_use]
    pub fn nav_nodes(&self, current: &str) -> Vec<NavNode> {
        let trail = self.current_trail(current);
        self.tree
            .root_sections()
            .iter()
            .filter_map(|&id| self.nav_node(id, current, &trail, 1))
            .collect()
    }

    /// Pages on the path from a root section down to `current`, inclusive.
    fn current_trail(&self, current: &str) -> HashSet<NodeId> {
        let mut trail = HashSet::new();
        let mut next = self.tree.page_by_slug(current).map(|page| page.id());
        while let Some(id) = next {
            if let Some(Node::Page(_)) = self.tree.node(id) {
                trail.insert(id);
            }
            next = self.tree.node(id).and_then(Node::parent);
        }
        trail
    }

    fn nav_node(
        &self,
        id: NodeId,
        current: &str,
        trail: &HashSet<NodeId>,
        depth: usize,
    ) -> Option<NavNode> {
        match self.tree.node(id)? {
            Node::Section(section) => Some(NavNode::Section {
                caption: section.label.clone(),
                children: section
                    .children
                    .iter()
                    .filter_map(|&child| self.nav_node(child, current, trail, depth))
                    .collect(),
            }),
            Node::Page(page) => {
                if self.config.exclude.iter().any(|slug| slug == &page.slug) {
                    return None;
                }
                let external = page.is_external();
                let link = if external {
                    page.slug.clone()
                } else {
                    self.helpers.relative_link(current, &page.slug)
                };
                let children = if self.config.max_depth.is_none_or(|max| depth < max) {
                    page.children
                        .iter()
                        .filter_map(|&child| self.nav_node(child, current, trail, depth + 1))
                        .collect()
                } else {
                    Vec::new()
                };
                Some(NavNode::Page {
                    title: self.helpers.render_title(page),
                    link,
                    external,
                    current: trail.contains(&page.id),
                    children,
                })
            }
        }
    }
}

fn write_html(out: &mut String, node: &NavNode, depth: usize) {
    match node {
        NavNode::Section { caption, children } => {
            if let Some(caption) = caption {
                let _ = writeln!(
                    out,
                    "<p class=\"caption\"><span class=\"caption-text\">{}</span></p>",
                    escape_html(caption)
                );
            }
            out.push_str("<ul>\n");
            for child in children {
                if matches!(child, NavNode::Section { .. }) {
                    let _ = writeln!(out, "<li class=\"toctree-l{depth}\">");
                    write_html(out, child, depth);
                    out.push_str("</li>\n");
                } else {
                    write_html(out, child, depth);
                }
            }
            out.push_str("</ul>\n");
        }
        NavNode::Page {
            title,
            link,
            external,
            current,
            children,
        } => {
            let current_class = if *current { " current" } else { "" };
            let kind = if *external { "external" } else { "internal" };
            let _ = write!(
                out,
                "<li class=\"toctree-l{depth}{current_class}\">\
                 <a class=\"reference {kind}{current_class}\" href=\"{}\">{}</a>",
                escape_html(link),
                escape_html(title)
            );
            if children.is_empty() {
                out.push_str("</li>\n");
            } else {
                out.push('\n');
                for child in children {
                    write_html(out, child, depth + 1);
                }
                out.push_str("</li>\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::TocConfig;
    use crate::mock::MockDocumentGraph;
    use crate::navigation::DirectiveRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn build(graph: MockDocumentGraph, config: TocConfig) -> NavigationTree {
        let mut nav = NavigationTree::new(Arc::new(graph), config);
        nav.initialize().unwrap();
        nav
    }

    /// index -> [guide, genindex, docs.rs]; guide -> [guide/setup]
    fn site() -> MockDocumentGraph {
        MockDocumentGraph::new()
            .with_directive(DirectiveRecord::new(
                "index",
                Some("Contents"),
                [
                    ("Guide", "guide"),
                    ("Index", "genindex"),
                    ("Docs", "https://docs.rs"),
                ],
            ))
            .with_directive(DirectiveRecord::new("guide", None, [("Setup", "guide/setup")]))
            .with_document("genindex")
            .with_document("guide/setup")
    }

    struct Shouting;

    impl RenderHelpers for Shouting {
        fn render_title(&self, page: &Page) -> String {
            page.title().to_uppercase()
        }

        fn relative_link(&self, _from: &str, to: &str) -> String {
            format!("/{to}.html")
        }
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("a/b", "a/c"), "c");
        assert_eq!(relative_path("a/b/c", "a/d"), "../d");
        assert_eq!(relative_path("", "domains/billing"), "domains/billing");
        assert_eq!(relative_path("guide", "guide"), "guide");
        assert_eq!(relative_path("a/", "a"), "../a");
        assert_eq!(relative_path("guide/setup", "guide"), "../guide");
        assert_eq!(relative_path("guide", ""), "./");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
    }

    #[test]
    fn test_render_html_marks_current_trail() {
        let nav = build(site(), TocConfig::default());

        let html = nav.render(RenderFormat::Html, "guide/setup").unwrap();

        assert_eq!(
            html,
            "<div class=\"toctree-wrapper\">\n\
             <p class=\"caption\"><span class=\"caption-text\">Contents</span></p>\n\
             <ul>\n\
             <li class=\"toctree-l1 current\">\
             <a class=\"reference internal current\" href=\"../guide\">Guide</a>\n\
             <ul>\n\
             <li class=\"toctree-l2 current\">\
             <a class=\"reference internal current\" href=\"setup\">Setup</a></li>\n\
             </ul>\n\
             </li>\n\
             <li class=\"toctree-l1\">\
             <a class=\"reference external\" href=\"https://docs.rs\">Docs</a></li>\n\
             </ul>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_excluded_pages_stay_in_tree() {
        let nav = build(site(), TocConfig::default());

        let html = nav.render(RenderFormat::Html, "index").unwrap();

        assert!(!html.contains("genindex"));
        assert!(nav.page("genindex").is_some());
    }

    #[test]
    fn test_render_json() {
        let nav = build(site(), TocConfig::default());

        let rendered = nav.render(RenderFormat::Json, "index").unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(
            value,
            json!([{
                "type": "section",
                "caption": "Contents",
                "children": [
                    {
                        "type": "page",
                        "title": "Guide",
                        "link": "guide",
                        "external": false,
                        "current": false,
                        "children": [{
                            "type": "section",
                            "children": [{
                                "type": "page",
                                "title": "Setup",
                                "link": "guide/setup",
                                "external": false,
                                "current": false
                            }]
                        }]
                    },
                    {
                        "type": "page",
                        "title": "Docs",
                        "link": "https://docs.rs",
                        "external": true,
                        "current": false
                    }
                ]
            }])
        );
    }

    #[test]
    fn test_max_depth_limits_nesting() {
        let config = TocConfig {
            max_depth: Some(1),
            ..TocConfig::default()
        };
        let nav = build(site(), config);

        let nodes = nav.nav_nodes("index");

        let NavNode::Section { children, .. } = &nodes[0] else {
            panic!("expected section");
        };
        assert!(matches!(&children[0], NavNode::Page { children, .. } if children.is_empty()));
    }

    #[test]
    fn test_custom_helpers_are_used() {
        let nav = build(site(), TocConfig::default()).with_render_helpers(Arc::new(Shouting));

        let html = nav.render(RenderFormat::Html, "index").unwrap();

        assert!(html.contains("href=\"/guide.html\">GUIDE</a>"));
        assert!(html.contains("href=\"https://docs.rs\">DOCS</a>"));
    }

    #[test]
    fn test_captioned_nested_section_renders_as_list_item() {
        let graph = MockDocumentGraph::new()
            .with_directive(DirectiveRecord::new("index", None, [("Guide", "guide")]))
            .with_directive(DirectiveRecord::new(
                "guide",
                Some("Advanced & More"),
                [("Deep Dive", "deep-dive")],
            ))
            .with_document("deep-dive");
        let nav = build(graph, TocConfig::default());

        let html = nav.render(RenderFormat::Html, "index").unwrap();

        assert!(html.contains(
            "<li class=\"toctree-l1\">\n\
             <p class=\"caption\"><span class=\"caption-text\">Advanced &amp; More</span></p>\n\
             <ul>\n"
        ));
    }

    #[test]
    fn test_render_empty_tree() {
        let graph = MockDocumentGraph::new().with_document("index");
        let nav = build(graph, TocConfig::default());

        assert_eq!(
            nav.render(RenderFormat::Html, "index").unwrap(),
            "<div class=\"toctree-wrapper\">\n</div>\n"
        );
        assert_eq!(nav.render(RenderFormat::Json, "index").unwrap(), "[]");
    }
}

//! In-memory page: the [`View`] the daemon renders to HTML.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::error::ViewError;
use crate::schedule::BroadcastSlot;
use crate::view::{Element, Indicator, Placement, View};

#[derive(Debug, Clone, Default)]
struct Node {
    text: String,
    attributes: BTreeMap<String, String>,
    rows: VecDeque<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct PageDocument {
    title: String,
    slot: BroadcastSlot,
    nodes: BTreeMap<Element, Node>,
    /// Unset until the live banner has been evaluated.
    indicators: HashMap<Indicator, bool>,
}

impl PageDocument {
    /// A page exposing every element the controller expects.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_elements(title, &Element::ALL)
    }

    /// A page exposing only `elements`; lookups of anything else fail.
    pub fn with_elements(title: impl Into<String>, elements: &[Element]) -> Self {
        Self {
            title: title.into(),
            slot: BroadcastSlot::default(),
            nodes: elements.iter().map(|e| (*e, Node::default())).collect(),
            indicators: HashMap::new(),
        }
    }

    /// Slot named in the off-air caption.
    pub fn with_slot(mut self, slot: BroadcastSlot) -> Self {
        self.slot = slot;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rows of a table from top to bottom, or `None` if the page has no such table.
    pub fn rows(&self, table: Element) -> Option<Vec<Vec<String>>> {
        self.nodes
            .get(&table)
            .map(|node| node.rows.iter().cloned().collect())
    }

    pub fn is_visible(&self, indicator: Indicator) -> Option<bool> {
        self.indicators.get(&indicator).copied()
    }

    fn node(&self, element: Element) -> Result<&Node, ViewError> {
        self.nodes
            .get(&element)
            .ok_or(ViewError::MissingElement(element))
    }

    fn node_mut(&mut self, element: Element) -> Result<&mut Node, ViewError> {
        self.nodes
            .get_mut(&element)
            .ok_or(ViewError::MissingElement(element))
    }

    pub fn render_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/css/estilo.css">
</head>
<body>
    <header>
        <h1>{title}</h1>
        <span class="live"{live_style}>EN VIVO</span>
        <span class="live-off"{off_style}>{off_air}</span>
        {link}
    </header>
    <main>
        <section>
            <h2>Próximas entrevistas</h2>
            {preview}
        </section>
        <section>
            <h2>Entrevistades</h2>
            {interviews}
        </section>
        <section>
            <h2>Agradecimientos</h2>
            {acknowledgements}
        </section>
        <section>
            {artist_embed}
            {playlist_embed}
        </section>
    </main>
</body>
</html>
"#,
            title = html_escape(&self.title),
            live_style = self.display_style(Indicator::Live),
            off_style = self.display_style(Indicator::OffAir),
            off_air = html_escape(&self.slot.label()),
            link = self.render_link(),
            preview = self.render_table(Element::PreviewTable),
            interviews = self.render_table(Element::InterviewTable),
            acknowledgements = self.render_acknowledgements(),
            artist_embed = self.render_embed(Element::ArtistEmbed),
            playlist_embed = self.render_embed(Element::PlaylistEmbed),
        )
    }

    fn display_style(&self, indicator: Indicator) -> &'static str {
        match self.is_visible(indicator) {
            Some(true) => r#" style="display: inline""#,
            Some(false) => r#" style="display: none""#,
            None => "",
        }
    }

    fn render_link(&self) -> String {
        let Ok(node) = self.node(Element::LastBroadcastLink) else {
            return String::new();
        };
        format!(
            r#"<a id="{}"{}>Escuchá el último programa</a>"#,
            Element::LastBroadcastLink.id(),
            render_attributes(&node.attributes)
        )
    }

    fn render_table(&self, table: Element) -> String {
        let Ok(node) = self.node(table) else {
            return String::new();
        };
        let mut body = String::new();
        for row in &node.rows {
            body.push_str("<tr>");
            for cell in row {
                body.push_str(&format!("<td>{}</td>", html_escape(cell)));
            }
            body.push_str("</tr>\n");
        }
        format!(
            r#"<table>
                <thead><tr><th>Entrevistade</th><th>Tema</th><th>Fecha</th></tr></thead>
                <tbody id="{}">
{}                </tbody>
            </table>"#,
            table.id(),
            body
        )
    }

    fn render_acknowledgements(&self) -> String {
        let Ok(node) = self.node(Element::Acknowledgements) else {
            return String::new();
        };
        format!(
            r#"<p id="{}">{}</p>"#,
            Element::Acknowledgements.id(),
            html_escape(&node.text)
        )
    }

    fn render_embed(&self, element: Element) -> String {
        let Ok(node) = self.node(element) else {
            return String::new();
        };
        format!(
            r#"<iframe id="{}"{} width="100%" height="150" scrolling="no" frameborder="no"></iframe>"#,
            element.id(),
            render_attributes(&node.attributes)
        )
    }
}

impl View for PageDocument {
    fn text(&self, element: Element) -> Result<String, ViewError> {
        Ok(self.node(element)?.text.clone())
    }

    fn insert_text(
        &mut self,
        element: Element,
        text: &str,
        placement: Placement,
    ) -> Result<(), ViewError> {
        let node = self.node_mut(element)?;
        match placement {
            Placement::Prepend => node.text.insert_str(0, text),
            Placement::Append => node.text.push_str(text),
        }
        Ok(())
    }

    fn attribute(&self, element: Element, name: &str) -> Result<Option<String>, ViewError> {
        Ok(self.node(element)?.attributes.get(name).cloned())
    }

    fn set_attribute(
        &mut self,
        element: Element,
        name: &str,
        value: &str,
    ) -> Result<(), ViewError> {
        self.node_mut(element)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn insert_row(
        &mut self,
        table: Element,
        cells: &[&str],
        placement: Placement,
    ) -> Result<(), ViewError> {
        let row: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        let node = self.node_mut(table)?;
        match placement {
            Placement::Prepend => node.rows.push_front(row),
            Placement::Append => node.rows.push_back(row),
        }
        Ok(())
    }

    fn set_visible(&mut self, indicator: Indicator, visible: bool) {
        self.indicators.insert(indicator, visible);
    }
}

fn render_attributes(attributes: &BTreeMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(name, value)| format!(r#" {}="{}""#, name, html_escape(value)))
        .collect()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

//! Typst markup for a document under a style

use super::format::RenderFormat;
use crate::bundle::model::{ContentItem, Document, FigureSource, Section};
use crate::bundle::styles::definition::CLOSING;
use crate::bundle::styles::{substitute, Namespaces, StyleDefinition, SECTION_ORDER};

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn equation(doc: &Document, label: &str) -> String {
    match doc.equation(label) {
        Some(eq) => {
            let math = eq
                .cached_render(RenderFormat::SymbolicTypeset)
                .unwrap_or_else(|| eq.fallback_text());
            if eq.numbered {
                format!("$ {} $ <{}>", math, label)
            } else {
                format!("$ {} $", math)
            }
        }
        None => missing("equation", label),
    }
}

fn figure(doc: &Document, label: &str) -> String {
    let fig = match doc.figure(label) {
        Some(fig) => fig,
        None => return missing("figure", label),
    };
    let body = match (&fig.source, fig.fragment()) {
        (_, Some(fragment)) => fragment.to_string(),
        (FigureSource::Imported { path }, _) => format!("#image(\"{}\")", path),
        _ => "#rect(width: 100%, height: 2in)".to_string(),
    };
    format!(
        "#figure([{}], caption: [{}]) <{}>",
        body, fig.caption, label
    )
}

fn table(doc: &Document, label: &str) -> String {
    let table = match doc.table(label) {
        Some(table) => table,
        None => return missing("table", label),
    };
    let mut cells: Vec<String> = table.headers.iter().map(|h| format!("[*{}*]", h)).collect();
    for row in &table.rows {
        cells.extend(row.iter().map(|cell| format!("[{}]", cell)));
    }
    format!(
        "#figure(\n  table(\n    columns: {},\n    {},\n  ),\n  caption: [{}]\n) <{}>",
        table.columns(),
        cells.join(", "),
        table.caption,
        label
    )
}

fn theorem(doc: &Document, label: &str) -> String {
    let thm = match doc.theorem(label) {
        Some(thm) => thm,
        None => return missing("theorem", label),
    };
    let heading = if thm.name.is_empty() {
        format!("*{}.*", capitalize(&thm.kind))
    } else {
        format!("*{} ({}).*", capitalize(&thm.kind), thm.name)
    };
    let mut body = format!("  {} {}", heading, thm.statement);
    if let Some(proof) = &thm.proof {
        body.push_str(&format!("\n\n  _Proof._ {}", proof));
    }
    format!(
        "#block(stroke: 1pt + gray, inset: 10pt, radius: 4pt)[\n{}\n] <{}>",
        body, label
    )
}

fn algorithm(doc: &Document, label: &str) -> String {
    let alg = match doc.algorithm(label) {
        Some(alg) => alg,
        None => return missing("algorithm", label),
    };
    let steps: Vec<String> = alg.steps.iter().map(|s| format!("  + {}", s)).collect();
    format!(
        "#figure(kind: \"algorithm\", supplement: [Algorithm], [\n{}\n], caption: [{}]) <{}>",
        steps.join("\n"),
        alg.caption,
        label
    )
}

fn missing(kind: &str, label: &str) -> String {
    format!("#text(fill: red)[?? {} {}]", kind, label)
}

fn render_section(doc: &Document, section: &Section, out: &mut Vec<String>) {
    out.push(format!("#heading(level: {})[{}]", section.level, section.title));
    for item in &section.content {
        match item {
            ContentItem::Text(text) => out.push(text.trim().to_string()),
            ContentItem::EquationRef(label) => out.push(equation(doc, label)),
            ContentItem::FigureRef(label) => out.push(figure(doc, label)),
            ContentItem::TableRef(label) => out.push(table(doc, label)),
            ContentItem::TheoremRef(label) => out.push(theorem(doc, label)),
            ContentItem::AlgorithmRef(label) => out.push(algorithm(doc, label)),
            ContentItem::Section(child) => render_section(doc, child, out),
        }
    }
}

fn bibliography(doc: &Document) -> Option<String> {
    if doc.bibliography().is_empty() {
        return None;
    }
    let mut lines = vec!["#heading(level: 1, numbering: none)[References]".to_string()];
    for entry in doc.bibliography().values() {
        let fields: Vec<&str> = ["author", "title", "year"]
            .iter()
            .filter_map(|name| entry.get(name))
            .collect();
        lines.push(format!("- [{}] {}", entry.key, fields.join(", ")));
    }
    Some(lines.join("\n"))
}

/// Markup for the document body: sections, then the bibliography
pub fn render_body(doc: &Document) -> String {
    let mut out = Vec::new();
    for root in doc.sections() {
        render_section(doc, root, &mut out);
    }
    out.extend(bibliography(doc));
    out.join("\n\n")
}

/// Full markup: the style's sections around the body, placeholders expanded
pub fn render_document(doc: &Document, style: &StyleDefinition) -> String {
    let namespaces = Namespaces::from(doc);
    let expand = |name: &str| {
        style
            .section(name)
            .map(|body| substitute(body, &namespaces, &style.line_break))
            .map(|text| text.trim_end().to_string())
            .filter(|text| !text.is_empty())
    };

    let mut parts = vec![format!("// {} style", style.name)];
    parts.extend(SECTION_ORDER.into_iter().filter_map(|name| expand(name)));
    let body = render_body(doc);
    if !body.is_empty() {
        parts.push(body);
    }
    parts.extend(expand(CLOSING));
    let mut text = parts.join("\n\n");
    text.push('\n');
    text
}

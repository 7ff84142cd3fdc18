//! Server-rendered HTML for the three demos and the home page.

use std::fmt::Write;

use crate::page::{DemoKind, ListItem, PageView, Phase};
use crate::summary::SummaryEntry;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; padding: 24px; color: #111; }
h1 { text-align: center; }
.grid { display: grid; grid-template-columns: 1fr 2fr; gap: 16px; max-width: 1100px; margin: 0 auto; }
.list { border: 1px solid #ddd; border-radius: 4px; padding: 12px; height: 80vh; overflow-y: auto; }
.item { padding: 8px; border-bottom: 1px solid #eee; cursor: grab; }
.item small { color: #666; }
.zone { border: 4px dashed #ccc; border-radius: 4px; height: 80vh; display: flex; flex-direction: column; justify-content: center; align-items: center; text-align: center; padding: 24px; }
.placeholder { color: #999; font-size: 1.2em; }
.loading { color: #2563eb; }
.result { margin-top: 16px; padding: 16px; border: 1px solid #ddd; border-radius: 4px; background: #f9fafb; text-align: left; max-width: 36em; }
.cards { display: grid; grid-template-columns: repeat(3, 1fr); gap: 32px; max-width: 1000px; margin: 0 auto; }
.card { display: block; padding: 24px; border: 1px solid #e5e7eb; border-radius: 12px; text-decoration: none; color: inherit; text-align: center; }
.summary { max-width: 56em; margin: 0 auto; }
.summary article { border: 1px solid #ddd; border-radius: 4px; padding: 16px; margin-bottom: 24px; }
.summary h2 { white-space: pre-line; font-size: 1.1em; }
.summary pre { white-space: pre-wrap; background: #f9fafb; padding: 8px; }
nav { display: flex; justify-content: space-between; max-width: 1100px; margin: 32px auto 0; }
"#;

const DRAG_SCRIPT: &str = r#"
document.querySelectorAll('[data-index]').forEach(function (el) {
  el.addEventListener('dragstart', function (e) {
    e.dataTransfer.setData('text/plain', el.dataset.index);
  });
});
var zone = document.getElementById('drop-zone');
zone.addEventListener('dragover', function (e) { e.preventDefault(); });
zone.addEventListener('drop', function (e) {
  e.preventDefault();
  fetch('/api/__SLUG__/drop', {
    method: 'POST',
    headers: { 'Content-Type': 'text/plain' },
    body: e.dataTransfer.getData('text/plain')
  }).finally(function () { location.reload(); });
});
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        head_extra,
        STYLE,
        body
    )
}

pub fn index() -> String {
    let cards = [
        ("/relevance", "Relevance Classifier", "Drag a news article and check if it's outbreak-related."),
        ("/extraction", "Information Extraction", "Extract disease, date, location, and number of cases."),
        ("/summary", "Outbreak Summary", "Read model-written summaries of outbreak events."),
    ];

    let mut body = String::from("<h1>EIOS Interactive Demos</h1>\n<div class=\"cards\">\n");
    for (href, title, blurb) in cards {
        let _ = writeln!(
            body,
            "<a class=\"card\" href=\"{}\"><h2>{}</h2><p>{}</p></a>",
            href,
            escape(title),
            escape(blurb)
        );
    }
    body.push_str("</div>");
    layout("EIOS Interactive Demos", "", &body)
}

fn result_panel(view: &PageView) -> String {
    let result = match &view.phase {
        Phase::Settled(result) => result,
        _ => return String::new(),
    };

    let mut panel = String::from("<div class=\"result\">\n");
    match view.kind {
        DemoKind::Relevance => {
            // First line is the verdict, rendered as the heading.
            let mut lines = result.lines().into_iter();
            if let Some((label, value)) = lines.next() {
                let _ = writeln!(panel, "<h4>{}: {}</h4>", label, escape(&value));
            }
            for (label, value) in lines {
                let _ = writeln!(panel, "<p>{}: {}</p>", label, escape(&value));
            }
        }
        DemoKind::Extraction => {
            panel.push_str("<h4>Extracted Information</h4>\n");
            for (label, value) in result.lines() {
                let _ = writeln!(panel, "<p><strong>{}:</strong> {}</p>", label, escape(&value));
            }
        }
    }
    panel.push_str("</div>\n");
    panel
}

fn drop_zone(view: &PageView) -> String {
    let Some(article) = &view.selected else {
        return format!("<p class=\"placeholder\">{}</p>", escape(view.kind.placeholder()));
    };

    let mut zone = String::from("<div>\n<h3>Dropped Article</h3>\n");
    let _ = writeln!(zone, "<p><strong>{}</strong></p>", escape(&article.title));
    for text in [&article.summary, &article.translated_description, &article.description] {
        let _ = writeln!(zone, "<p>{}</p>", escape(text));
    }
    if view.loading {
        let _ = writeln!(zone, "<p class=\"loading\">{}</p>", escape(view.kind.loading_text()));
    }
    zone.push_str(&result_panel(view));
    zone.push_str("</div>");
    zone
}

fn navigation(kind: DemoKind) -> &'static str {
    match kind {
        DemoKind::Relevance => "<nav><a href=\"/\">Home</a><a href=\"/extraction\">Next: Information Extraction</a></nav>",
        DemoKind::Extraction => "<nav><a href=\"/relevance\">Back to Relevance</a><a href=\"/summary\">Next: Outbreak Summary</a></nav>",
    }
}

pub fn drop_page(view: &PageView, items: &[ListItem]) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(view.kind.title()));
    if view.kind == DemoKind::Extraction {
        body.push_str(
            "<p style=\"text-align:center\">Drag an article from the list to the center box to extract disease, location, date, and case count.</p>\n",
        );
    }

    body.push_str("<div class=\"grid\">\n<div class=\"list\">\n<h2>Articles</h2>\n");
    for item in items {
        let _ = writeln!(
            body,
            "<div class=\"item\" draggable=\"true\" data-index=\"{}\"><p>{}</p><small>{}</small></div>",
            item.index,
            escape(&item.title),
            escape(&item.summary)
        );
    }
    body.push_str("</div>\n<div id=\"drop-zone\" class=\"zone\">\n");
    body.push_str(&drop_zone(view));
    body.push_str("\n</div>\n</div>\n");
    body.push_str(navigation(view.kind));
    let _ = write!(body, "\n<script>{}</script>", DRAG_SCRIPT.replace("__SLUG__", view.kind.slug()));

    // Poll until the request settles.
    let head = if view.loading { "<meta http-equiv=\"refresh\" content=\"1\">\n" } else { "" };
    layout(view.kind.title(), head, &body)
}

pub fn summary_page(entries: &[SummaryEntry]) -> String {
    let mut body = String::from("<div class=\"summary\">\n<h1>LLM Outbreak Summaries</h1>\n");
    for entry in entries {
        let _ = writeln!(
            body,
            "<article><h2>{}</h2><pre>{}</pre></article>",
            escape(&entry.response),
            escape(&entry.bullets)
        );
    }
    body.push_str("</div>");
    layout("Outbreak Summary", "", &body)
}

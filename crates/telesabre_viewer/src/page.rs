// Copyright contributors to the TeleSABRE Replay Viewer project

//! Standalone HTML page for one committed frame.

use std::fmt::{self, Display, Formatter, Write};

use crate::{
    candidates::HEADER,
    layout::PaneLayout,
    state::ViewerState,
    svg::{circuit_svg, topology_svg},
};

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex;flex-direction:column;height:100vh}\
header{display:flex;gap:1.5em;padding:.5em 1em;border-bottom:1px solid #ccc}\
.deadlock{color:#fff;background:#c00;padding:0 .5em}\
main{display:flex;flex:1;min-height:0}\
.pane{overflow:hidden;border-left:4px solid #ddd}\
.pane svg{width:100%;height:100%}\
table{border-collapse:collapse;font-size:12px}\
td,th{padding:2px 6px;text-align:right}\
tr.swap td:nth-child(2){color:red}\
tr.teleport td:nth-child(2){color:blue}\
tr.telegate td:nth-child(2){color:purple}";

pub fn render_page(state: &ViewerState, layout: &PaneLayout) -> String {
    Page { state, layout }.to_string()
}

struct Page<'a> {
    state: &'a ViewerState,
    layout: &'a PaneLayout,
}

impl Display for Page<'_> {
    fn fmt(&self, out: &mut Formatter<'_>) -> fmt::Result {
        write_page(out, self.state, self.layout)
    }
}

fn write_page(out: &mut Formatter<'_>, state: &ViewerState, layout: &PaneLayout) -> fmt::Result {
    let scene = state.scene();
    let frame = state.frame();
    write!(
        out,
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>TeleSABRE replay</title>\
         <style>{STYLE}</style></head><body><header>"
    )?;

    match &frame.header {
        Some(header) => {
            write!(
                out,
                "<span>Iteration {} / {}</span><span>Energy {}</span>",
                header.iteration,
                state.len().saturating_sub(1),
                header.energy_text()
            )?;
            if let Some(counts) = header.counts {
                write!(
                    out,
                    "<span>Swaps {}</span><span>Teleports {}</span><span>Telegates {}</span>",
                    counts.swaps, counts.teleports, counts.telegates
                )?;
            }
        }
        None => out.write_str("<span>No iteration rendered</span>")?,
    }
    if frame.deadlock {
        out.write_str("<span class=\"deadlock\">Solving deadlock</span>")?;
    }
    out.write_str("</header><main>")?;

    write!(
        out,
        "<div class=\"pane\" style=\"flex:1\">{}</div>",
        topology_svg(scene, frame, &layout.topology)
    )?;
    write!(
        out,
        "<div class=\"pane\" style=\"width:{}px;display:flex;flex-direction:column\">\
         <div style=\"flex:1;min-height:0\">{}</div>",
        layout.splitter.width(),
        circuit_svg(scene, frame, state.config(), &layout.circuit)
    )?;

    out.write_str("<table><thead><tr>")?;
    for title in HEADER {
        write!(out, "<th>{title}</th>")?;
    }
    out.write_str("</tr></thead><tbody>")?;
    for row in frame.candidates.rows() {
        write!(out, "<tr class=\"{}\"", row.kind.css_class())?;
        if !row.visible {
            out.write_str(" hidden")?;
        }
        out.write_char('>')?;
        for cell in row.cells() {
            write!(out, "<td>{}</td>", escape(&cell))?;
        }
        out.write_str("</tr>")?;
    }
    out.write_str("</tbody></table></div></main></body></html>")?;
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// Copyright contributors to the TeleSABRE Replay Viewer project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SVG output of the two panes. Elements are emitted in the surface's draw
//! order with the attributes the current frame assigns them.

use std::fmt::{self, Display, Formatter};

use crate::{
    config::ViewerConfig,
    frame::Frame,
    geometry::{Point, path_data},
    layout::PanZoom,
    scene::{ElementRef, LinkShape, Scene},
    style::{BLACK, DIM_GRAY, GOLD, GRAY, PINK},
};

const MARGIN: f64 = 40.0;

/// Topology pane: links, needed overlays, placeholders and qubit nodes.
pub fn topology_svg(scene: &Scene, frame: &Frame, view: &PanZoom) -> String {
    TopologySvg { scene, frame, view }.to_string()
}

/// Circuit pane: gate glyphs and dependency edges.
pub fn circuit_svg(scene: &Scene, frame: &Frame, config: &ViewerConfig, view: &PanZoom) -> String {
    CircuitSvg {
        scene,
        frame,
        config,
        view,
    }
    .to_string()
}

struct TopologySvg<'a> {
    scene: &'a Scene,
    frame: &'a Frame,
    view: &'a PanZoom,
}

impl Display for TopologySvg<'_> {
    fn fmt(&self, out: &mut Formatter<'_>) -> fmt::Result {
        let (width, height) = extent(self.scene.index.qubits.iter().copied());
        open(out, width, height, self.view, "topology")?;
        for &element in &self.scene.topology.order {
            topology_element(out, self.scene, self.frame, element)?;
        }
        out.write_str(CLOSE)
    }
}

struct CircuitSvg<'a> {
    scene: &'a Scene,
    frame: &'a Frame,
    config: &'a ViewerConfig,
    view: &'a PanZoom,
}

impl Display for CircuitSvg<'_> {
    fn fmt(&self, out: &mut Formatter<'_>) -> fmt::Result {
        let (width, height) = extent(self.scene.index.gates.iter().copied());
        open(out, width, height, self.view, "circuit")?;
        for &element in &self.scene.circuit.order {
            circuit_element(out, self.scene, self.frame, self.config, element)?;
        }
        out.write_str(CLOSE)
    }
}

fn extent(points: impl Iterator<Item = Point>) -> (f64, f64) {
    points.fold((MARGIN, MARGIN), |(w, h), p| {
        (w.max(p.x + MARGIN), h.max(p.y + MARGIN))
    })
}

fn open(out: &mut Formatter<'_>, width: f64, height: f64, view: &PanZoom, id: &str) -> fmt::Result {
    write!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"{id}\" viewBox=\"0 0 {width} {height}\">\
         <g transform=\"{}\">",
        view.transform()
    )
}

const CLOSE: &str = "</g></svg>";

fn topology_element(
    out: &mut Formatter<'_>,
    scene: &Scene,
    frame: &Frame,
    element: ElementRef,
) -> fmt::Result {
    match element {
        ElementRef::Overlay(i) => {
            let overlay = &scene.overlays[i];
            write!(
                out,
                "<line class=\"needed\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{PINK}\" \
                 stroke-width=\"6\" stroke-dasharray=\"1.5 1.5\" opacity=\"{}\"/>",
                overlay.from.x,
                overlay.from.y,
                overlay.to.x,
                overlay.to.y,
                if frame.needed[i] { 1 } else { 0 }
            )
        }
        ElementRef::Link(i) => {
            let style = frame.links[i];
            let paint = format!(
                "stroke=\"{}\" stroke-width=\"{}\"",
                style.stroke(),
                style.stroke_width()
            );
            match &scene.links[i].shape {
                LinkShape::Line { from, to } => write!(
                    out,
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" {paint}/>",
                    from.x, from.y, to.x, to.y
                ),
                LinkShape::Wave(points) => write!(
                    out,
                    "<path d=\"{}\" fill=\"none\" {paint}/>",
                    path_data(points)
                ),
            }
        }
        ElementRef::Placeholder(i) => {
            let site = &scene.placeholders[i];
            let fill = if site.comm { DIM_GRAY } else { GRAY };
            write!(
                out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\"",
                site.at.x, site.at.y, site.radius
            )?;
            if site.source {
                write!(out, " stroke=\"{GOLD}\" stroke-width=\"1.5\"")?;
            }
            out.write_str("/>")
        }
        ElementRef::Qubit(i) => {
            let state = &frame.qubits[i];
            let node = &scene.qubits[i];
            write!(
                out,
                "<circle class=\"qubit\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{BLACK}\">\
                 <title>{}</title></circle>",
                state.position.x,
                state.position.y,
                node.radius,
                state.fill.color(),
                node.label
            )
        }
        ElementRef::QubitLabel(i) => {
            let state = &frame.qubits[i];
            let node = &scene.qubits[i];
            write!(
                out,
                "<text x=\"{}\" y=\"{}\" transform=\"translate({} {})\" text-anchor=\"middle\" \
                 dominant-baseline=\"central\" font-size=\"8\" opacity=\"{}\">{}</text>",
                node.home.x,
                node.home.y,
                state.label_offset.dx,
                state.label_offset.dy,
                if state.label_visible { 1 } else { 0 },
                node.label
            )
        }
        ElementRef::Dependency(_) | ElementRef::Gate(_) => Ok(()),
    }
}

fn circuit_element(
    out: &mut Formatter<'_>,
    scene: &Scene,
    frame: &Frame,
    config: &ViewerConfig,
    element: ElementRef,
) -> fmt::Result {
    match element {
        ElementRef::Dependency(i) => {
            let edge = &scene.dependencies[i];
            write!(
                out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{BLACK}\" opacity=\"{}\"/>",
                edge.from.x,
                edge.from.y,
                edge.to.x,
                edge.to.y,
                frame.dependencies[i].opacity(&config.opacity)
            )
        }
        ElementRef::Gate(i) => {
            let outline = if frame.executed[i] {
                format!("stroke=\"{GOLD}\" stroke-width=\"2\"")
            } else {
                format!("stroke=\"{BLACK}\" stroke-width=\"0.5\"")
            };
            write!(
                out,
                "<g class=\"gate\" opacity=\"{}\">",
                frame.gates[i].opacity(&config.opacity)
            )?;
            for cell in &scene.gates[i].cells {
                write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" {outline}/>\
                     <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" \
                     font-size=\"{}\">{}</text>",
                    cell.rect.origin.x,
                    cell.rect.origin.y,
                    cell.rect.width,
                    cell.rect.height,
                    cell.fill,
                    cell.label_at.x,
                    cell.label_at.y,
                    0.8 * cell.rect.height,
                    cell.label
                )?;
            }
            out.write_str("</g>")
        }
        _ => Ok(()),
    }
}

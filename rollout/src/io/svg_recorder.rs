use std::path::{Path, PathBuf};

use log::{debug, warn};
use rand::Rng;
use rand::prelude::SmallRng;
use svg::Document;
use svg::node::element::{Circle, Group, Path as SvgPath, Title};

use binsim::entities::PlacementObject;
use binsim::geometry::geo_traits::Shape;
use binsim::geometry::primitives::{AARectangle, Point, SPolygon};
use binsim::viz::Visualizer;

use crate::io;
use crate::io::svg_util::{self, Color, SvgDrawOptions};

/// [`Visualizer`] collecting the bin and every committed placement into an SVG document,
/// which is written to `path` on [`Visualizer::display`].
pub struct SvgRecorder {
    path: PathBuf,
    options: SvgDrawOptions,
    rng: SmallRng,
    bin: Option<AARectangle>,
    objects: Vec<RecordedObject>,
}

#[derive(Clone, Debug)]
struct RecordedObject {
    shape: SPolygon,
    reference: Point,
    color: Color,
}

impl SvgRecorder {
    pub fn new(path: impl Into<PathBuf>, options: SvgDrawOptions, rng: SmallRng) -> Self {
        Self {
            path: path.into(),
            options,
            rng,
            bin: None,
            objects: vec![],
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn n_objects(&self) -> usize {
        self.objects.len()
    }

    /// The drawing so far, `None` until a bin was added
    pub fn document(&self) -> Option<Document> {
        let bin = self.bin.as_ref()?;
        let objects = self.objects.iter().map(|o| (&o.shape, o.reference, o.color));
        Some(layout_to_svg(bin, objects, self.options))
    }
}

impl Visualizer for SvgRecorder {
    fn create_environment(&mut self) {
        self.bin = None;
        self.objects.clear();
    }

    fn add_bin(&mut self, length: f64, width: f64) {
        self.bin = Some(AARectangle::new(
            -length / 2.0,
            -width / 2.0,
            length / 2.0,
            width / 2.0,
        ));
    }

    fn add_object(&mut self, object: &PlacementObject) {
        let palette = &self.options.theme.object_palette;
        let color = palette[self.rng.random_range(0..palette.len())];
        debug!("[VIZ] recording object #{} in {color}", self.objects.len());

        self.objects.push(RecordedObject {
            shape: object.shape().clone(),
            reference: object.reference_point(),
            color,
        });
    }

    fn display(&mut self) {
        match self.document() {
            None => warn!("[VIZ] nothing to display, no bin was added"),
            Some(document) => {
                if let Err(e) = io::write_svg(&document, &self.path) {
                    warn!("[VIZ] could not write the rollout svg: {e:#}");
                }
            }
        }
    }
}

/// Bin with objects, every object given as its shape, reference point and fill
pub fn layout_to_svg<'a>(
    bin: &AARectangle,
    objects: impl IntoIterator<Item = (&'a SPolygon, Point, Color)>,
    options: SvgDrawOptions,
) -> Document {
    let theme = &options.theme;
    let vbox = bin.clone().scale(1.05);
    let stroke_width = svg_util::stroke_width(&vbox, theme);

    let mut objects_group = Group::new().set("id", "objects");
    for (i, (shape, reference, color)) in objects.into_iter().enumerate() {
        let Point(rx, ry) = reference;
        let mut group = Group::new()
            .set("id", format!("object_{i}"))
            .add(object_path(shape, color, options, stroke_width))
            .add(Title::new(format!(
                "object #{i}, reference: ({rx:.3}, {ry:.3}), area: {:.3}",
                shape.area()
            )));
        if options.reference_points {
            group = group.add(
                Circle::new()
                    .set("cx", rx)
                    .set("cy", ry)
                    .set("r", 3.0 * stroke_width)
                    .set("fill", "black"),
            );
        }
        objects_group = objects_group.add(group);
    }

    Document::new()
        .set("viewBox", svg_util::view_box(&vbox))
        .add(
            Group::new()
                .set("transform", svg_util::Y_UP)
                .add(bin_path(bin, options, stroke_width))
                .add(objects_group),
        )
}

pub fn bin_path(bin: &AARectangle, options: SvgDrawOptions, stroke_width: f64) -> SvgPath {
    let theme = &options.theme;
    svg_util::data_to_path(
        svg_util::aa_rect_data(bin),
        &[
            ("id", "bin"),
            ("fill", &*format!("{}", theme.bin_fill)),
            ("fill-opacity", &*format!("{}", theme.bin_opacity)),
            ("stroke", "black"),
            ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
        ],
    )
    .add(Title::new(format!(
        "bin, length: {:.3}, width: {:.3}",
        bin.width(),
        bin.height()
    )))
}

pub fn object_path(
    shape: &SPolygon,
    color: Color,
    options: SvgDrawOptions,
    stroke_width: f64,
) -> SvgPath {
    svg_util::data_to_path(
        svg_util::simple_polygon_data(shape),
        &[
            ("fill", &*format!("{color}")),
            ("fill-opacity", &*format!("{}", options.theme.object_opacity)),
            ("fill-rule", "nonzero"),
            ("stroke", &*format!("{}", svg_util::change_brightness(color, 0.5))),
            ("stroke-width", &*format!("{stroke_width}")),
        ],
    )
}

use ndarray::Array2;
use svg::Document;
use svg::node::element::{Group, Rectangle, Title};

use binsim::entities::State;
use binsim::mdp::landscape::Grid;

use crate::io::svg_recorder::{bin_path, object_path};
use crate::io::svg_util::{self, SvgDrawOptions};

/// Draws a reward landscape as one square cell per grid point, centered on the point.
/// Colors are scaled between the lowest and highest reward of `rewards`.
pub fn heatmap_to_svg(
    rewards: &Array2<f64>,
    state: &State,
    rotation: f64,
    options: SvgDrawOptions,
) -> Document {
    let theme = &options.theme;
    let grid = Grid::of(state);
    let bin_bbox = state.bin.bbox();
    let vbox = bin_bbox.clone().scale(1.10);
    let stroke_width = svg_util::stroke_width(&vbox, theme);

    let (min, max) = reward_range(rewards);

    let mut cells = Group::new().set("id", "heatmap");
    for ((row, col), &reward) in rewards.indexed_iter() {
        let x = col as i64 - grid.half_length;
        let y = row as i64 - grid.half_width;
        let t = match max > min {
            true => (reward - min) / (max - min),
            false => 0.0,
        };
        let fill = svg_util::interpolate_colors(theme.heat_low, theme.heat_high, t);
        cells = cells.add(
            Rectangle::new()
                .set("x", x as f64 - 0.5)
                .set("y", y as f64 - 0.5)
                .set("width", 1.0)
                .set("height", 1.0)
                .set("fill", format!("{fill}"))
                .add(Title::new(format!("({x}, {y}): {reward:.4}"))),
        );
    }

    let mut drawing = Group::new().set("transform", svg_util::Y_UP).add(cells);

    if options.heatmap_overlay {
        let mut overlay = Group::new()
            .set("id", "overlay")
            .add(bin_path(&bin_bbox, options, stroke_width).set("fill", "none"));
        for object in state.objects.iter() {
            overlay = overlay.add(
                object_path(object.shape(), theme.object_palette[0], options, stroke_width)
                    .set("fill", "none"),
            );
        }
        overlay = overlay.add(
            object_path(
                state.next_object.shape(),
                theme.object_palette[1],
                options,
                stroke_width,
            )
            .set("fill", "none")
            .set("stroke-dasharray", format!("{}", 5.0 * stroke_width)),
        );
        drawing = drawing.add(overlay);
    }

    Document::new()
        .set("viewBox", svg_util::view_box(&vbox))
        .add(Title::new(format!(
            "rotation: {:.1}°, reward range: [{min:.4}, {max:.4}]",
            rotation.to_degrees()
        )))
        .add(drawing)
}

fn reward_range(rewards: &Array2<f64>) -> (f64, f64) {
    rewards
        .iter()
        .filter(|r| r.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &r| {
            (min.min(r), max.max(r))
        })
}

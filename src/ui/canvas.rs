// src/ui/canvas.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use std::cell::RefCell;
use std::rc::Rc;

use crate::render::{Canvas, ChartInstance, ChartKind, ChartSpec, RenderError, Rgba};

type Binding = Rc<RefCell<Option<ChartSpec>>>;

/// A plot area that holds at most one chart at a time.
#[derive(Debug)]
pub struct PlotCanvas {
    canvas: Canvas,
    binding: Binding,
}

impl PlotCanvas {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            binding: Rc::new(RefCell::new(None)),
        }
    }

    #[cfg(test)]
    pub fn is_bound(&self) -> bool {
        self.binding.borrow().is_some()
    }

    pub fn bind(&self, spec: ChartSpec) -> Result<PlotChart, RenderError> {
        let mut slot = self.binding.borrow_mut();
        if slot.is_some() {
            return Err(RenderError::CanvasInUse(self.canvas));
        }
        *slot = Some(spec);

        Ok(PlotChart {
            canvas: self.canvas,
            binding: Rc::clone(&self.binding),
        })
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let binding = self.binding.borrow();
        let Some(spec) = binding.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label("No data yet");
            });
            return;
        };

        let labels = spec.labels.clone();
        let axis_labels = spec.labels.clone();
        let integer_ticks = spec.integer_ticks;
        let mut plot = Plot::new(self.canvas.id())
            .height(220.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_formatter(move |value, _max_chars, _range| axis_label(&axis_labels, value))
            .label_formatter(move |_name, point| {
                let label = label_near(&labels, point.x);
                if integer_ticks {
                    format!("{}\n{}", label, point.y.round())
                } else {
                    format!("{}\n{:.2}", label, point.y)
                }
            });
        if spec.begin_at_zero {
            plot = plot.include_y(0.0);
        }

        plot.show(ui, |plot_ui| match spec.kind {
            ChartKind::Bar => {
                let bars: Vec<Bar> = spec.points()
                    .enumerate()
                    .map(|(i, (label, value))| {
                        Bar::new(i as f64, value)
                            .name(label)
                            .width(0.8)
                            .fill(color(spec.fill_color))
                            .stroke(egui::Stroke::new(spec.border_width, color(spec.border_color)))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(&spec.dataset_label));
            }
            ChartKind::Line => {
                let points: PlotPoints = spec.points()
                    .enumerate()
                    .map(|(i, (_, value))| [i as f64, value])
                    .collect();
                let mut line = Line::new(points)
                    .name(&spec.dataset_label)
                    .color(color(spec.border_color))
                    .width(spec.border_width);
                if spec.fill {
                    line = line.fill(0.0_f32);
                }
                plot_ui.line(line);
            }
        });
    }
}

/// Live chart handle; destroying it frees the canvas.
#[derive(Debug)]
pub struct PlotChart {
    canvas: Canvas,
    binding: Binding,
}

impl ChartInstance for PlotChart {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn destroy(self: Box<Self>) {
        self.binding.borrow_mut().take();
    }
}

/// Category name for a tick on the x axis. Ticks between categories stay blank.
fn axis_label(labels: &[String], value: f64) -> String {
    let index = value.round();
    if index < 0.0 || (value - index).abs() > 1e-6 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Category under the pointer, snapping to the closest bar or point.
fn label_near(labels: &[String], value: f64) -> &str {
    let index = value.round();
    (index >= 0.0)
        .then(|| labels.get(index as usize))
        .flatten()
        .map(String::as_str)
        .unwrap_or("")
}

fn color(rgba: Rgba) -> egui::Color32 {
    let alpha = (rgba.a.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, alpha)
}

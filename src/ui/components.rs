//! Reusable UI components

use crate::theme;
use eframe::egui;

/// Dim one-line status such as "Loading items..."
pub fn status_text(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        )
        .selectable(false),
    );
}

/// Item card: thumbnail on top (if loaded), name wrapped below.
pub fn item_card(
    ui: &mut egui::Ui,
    name: &str,
    thumbnail: Option<&egui::TextureHandle>,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(theme::CARD_WIDTH, theme::CARD_HEIGHT),
        egui::Sense::hover(),
    );

    if ui.is_rect_visible(rect) {
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_ELEVATED);
        let border = if response.hovered() {
            theme::BORDER_DEFAULT
        } else {
            theme::BORDER_SUBTLE
        };
        painter.rect_stroke(
            rect,
            theme::RADIUS_DEFAULT,
            egui::Stroke::new(theme::STROKE_DEFAULT, border),
            egui::StrokeKind::Inside,
        );

        let inner = rect.shrink(theme::CARD_PADDING);
        let image_area = egui::Rect::from_min_size(
            inner.min,
            egui::vec2(inner.width(), theme::THUMBNAIL_HEIGHT),
        );

        if let Some(texture) = thumbnail {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(
                texture.id(),
                fit_contain(texture.size_vec2(), image_area),
                uv,
                egui::Color32::WHITE,
            );
        }

        let mut job = egui::text::LayoutJob::simple(
            name.to_owned(),
            egui::FontId::proportional(theme::FONT_SMALL),
            theme::TEXT_SECONDARY,
            inner.width(),
        );
        job.halign = egui::Align::Center;
        let galley = painter.layout_job(job);
        painter.galley(
            egui::pos2(inner.center().x, image_area.bottom() + theme::SPACING_SM),
            galley,
            theme::TEXT_SECONDARY,
        );
    }

    response.on_hover_text(name)
}

/// Largest rect with the image's aspect ratio that fits in `area`, centered.
pub fn fit_contain(image_size: egui::Vec2, area: egui::Rect) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return egui::Rect::from_center_size(area.center(), egui::Vec2::ZERO);
    }
    let scale = (area.width() / image_size.x).min(area.height() / image_size.y);
    egui::Rect::from_center_size(area.center(), image_size * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(130.0, 100.0))
    }

    #[test]
    fn wide_image_fills_width() {
        let fitted = fit_contain(egui::vec2(260.0, 100.0), area());
        assert_eq!(fitted.width(), 130.0);
        assert_eq!(fitted.height(), 50.0);
        assert_eq!(fitted.center(), area().center());
    }

    #[test]
    fn tall_image_fills_height() {
        let fitted = fit_contain(egui::vec2(50.0, 200.0), area());
        assert_eq!(fitted.height(), 100.0);
        assert_eq!(fitted.width(), 25.0);
        assert!(area().contains_rect(fitted));
    }

    #[test]
    fn small_image_is_scaled_up() {
        let fitted = fit_contain(egui::vec2(13.0, 10.0), area());
        assert_eq!(fitted.size(), egui::vec2(130.0, 100.0));
    }

    #[test]
    fn empty_image_has_no_area() {
        let fitted = fit_contain(egui::Vec2::ZERO, area());
        assert_eq!(fitted.area(), 0.0);
    }
}

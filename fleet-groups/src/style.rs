use iced::widget::button::Status as ButtonStatus;
use iced::widget::{button, container, scrollable};
use iced::{Background, Border, Color, Theme};

/// Colors shared by the dialog and the host window.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub overlay: Color,
    pub foreground: Color,
    pub dim_foreground: Color,
    pub accent: Color,
    pub modified: Color,
}

pub const PALETTE: Palette = Palette {
    background: Color::from_rgb(0.11, 0.12, 0.14),
    surface: Color::from_rgb(0.16, 0.17, 0.20),
    overlay: Color::from_rgb(0.27, 0.29, 0.34),
    foreground: Color::from_rgb(0.88, 0.89, 0.91),
    dim_foreground: Color::from_rgb(0.60, 0.62, 0.66),
    accent: Color::from_rgb(0.30, 0.52, 0.86),
    modified: Color::from_rgb(0.90, 0.36, 0.30),
};

pub fn backdrop_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.55).into()),
        ..Default::default()
    }
}

pub fn panel_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(PALETTE.surface.into()),
        text_color: Some(PALETTE.foreground),
        border: Border {
            width: 1.0,
            color: PALETTE.overlay,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn header_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(PALETTE.background.into()),
        text_color: Some(PALETTE.dim_foreground),
        ..Default::default()
    }
}

pub fn tree_row_style(
    is_selected: bool,
    is_hovered: bool,
    is_drop_target: bool,
) -> container::Style {
    let background = if is_drop_target {
        let mut color = PALETTE.accent;
        color.a = 0.35;
        Some(color.into())
    } else if is_selected {
        let mut color = PALETTE.accent;
        color.a = 0.7;
        Some(color.into())
    } else if is_hovered {
        let mut color = PALETTE.overlay;
        color.a = 0.6;
        Some(color.into())
    } else {
        None
    };

    container::Style {
        background,
        text_color: Some(PALETTE.foreground),
        ..Default::default()
    }
}

pub fn action_button_style(status: ButtonStatus) -> button::Style {
    let (background, text_color) = match status {
        ButtonStatus::Hovered | ButtonStatus::Pressed => {
            (PALETTE.accent, PALETTE.foreground)
        },
        ButtonStatus::Disabled => {
            let mut color = PALETTE.overlay;
            color.a = 0.4;
            (color, PALETTE.dim_foreground)
        },
        ButtonStatus::Active => (PALETTE.overlay, PALETTE.foreground),
    };

    button::Style {
        background: Some(background.into()),
        text_color,
        border: Border {
            radius: 3.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn thin_scroll_style(
    theme: &Theme,
    status: scrollable::Status,
) -> scrollable::Style {
    let mut style = scrollable::default(theme, status);
    let radius = iced::border::Radius::from(0.0);

    style.vertical_rail.border.radius = radius;
    style.vertical_rail.scroller.border.radius = radius;

    let mut scroller_color = match style.vertical_rail.scroller.background {
        Background::Color(color) => color,
        _ => PALETTE.dim_foreground,
    };
    scroller_color.a = (scroller_color.a * 0.7).min(1.0);
    style.vertical_rail.scroller.background = Background::Color(scroller_color);

    style
}

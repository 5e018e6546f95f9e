use eframe::egui::{
    self,
    RichText,
};
use egui::{
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Stroke,
    Visuals,
};

/// Paired dark/light palettes. Helper accessors hand out the semantic colors
/// the pages use for banners, badges and headings.
#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::clinic()
    }
}

impl Theme {
    /// Teal-forward palette used throughout the app.
    pub fn clinic() -> Self {
        Theme { dark: Palette::clinic_dark(), light: Palette::clinic_light() }
    }

    fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).accent).strong()
    }

    pub fn subtle(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).muted)
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).accent
    }

    pub fn ok(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).ok
    }

    pub fn warn(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).warn
    }

    pub fn err(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).err
    }
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    background_dim: Color32,
    background_raise: Color32,
    surface: Color32,
    foreground: Color32,
    muted: Color32,
    highlight: Color32,
    accent: Color32,
    ok: Color32,
    warn: Color32,
    err: Color32,
}

impl Palette {
    fn clinic_dark() -> Self {
        Self {
            background: Color32::from_rgb(24, 28, 33),
            background_dim: Color32::from_rgb(18, 21, 25),
            background_raise: Color32::from_rgb(37, 43, 50),
            surface: Color32::from_rgb(30, 35, 41),
            foreground: Color32::from_rgb(222, 228, 232),
            muted: Color32::from_rgb(130, 143, 155),
            highlight: Color32::from_rgb(46, 66, 78),
            accent: Color32::from_rgb(72, 190, 178),
            ok: Color32::from_rgb(96, 198, 122),
            warn: Color32::from_rgb(235, 172, 90),
            err: Color32::from_rgb(227, 104, 104),
        }
    }

    fn clinic_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 250, 251),
            background_dim: Color32::from_rgb(236, 240, 242),
            background_raise: Color32::from_rgb(255, 255, 255),
            surface: Color32::from_rgb(242, 246, 247),
            foreground: Color32::from_rgb(38, 48, 56),
            muted: Color32::from_rgb(118, 132, 142),
            highlight: Color32::from_rgb(205, 228, 226),
            accent: Color32::from_rgb(18, 130, 120),
            ok: Color32::from_rgb(34, 140, 72),
            warn: Color32::from_rgb(190, 120, 30),
            err: Color32::from_rgb(180, 60, 60),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: WidgetVisuals {
                    bg_fill: palette.background,
                    weak_bg_fill: palette.surface,
                    bg_stroke: Stroke {
                        color: palette.background_dim,
                        ..default.widgets.noninteractive.bg_stroke
                    },
                    fg_stroke: Stroke {
                        color: palette.foreground,
                        ..default.widgets.noninteractive.fg_stroke
                    },
                    ..default.widgets.noninteractive
                },
                inactive: WidgetVisuals {
                    bg_fill: palette.background_raise,
                    weak_bg_fill: palette.surface,
                    bg_stroke: Stroke {
                        color: palette.background_dim,
                        ..default.widgets.inactive.bg_stroke
                    },
                    fg_stroke: Stroke {
                        color: palette.foreground,
                        ..default.widgets.inactive.fg_stroke
                    },
                    ..default.widgets.inactive
                },
                hovered: WidgetVisuals {
                    bg_fill: palette.highlight,
                    weak_bg_fill: palette.background_raise,
                    bg_stroke: Stroke { color: palette.accent, ..default.widgets.hovered.bg_stroke },
                    fg_stroke: Stroke {
                        color: palette.foreground,
                        ..default.widgets.hovered.fg_stroke
                    },
                    ..default.widgets.hovered
                },
                active: WidgetVisuals {
                    bg_fill: palette.highlight,
                    weak_bg_fill: palette.background_raise,
                    bg_stroke: Stroke { color: palette.accent, ..default.widgets.active.bg_stroke },
                    fg_stroke: Stroke {
                        color: palette.foreground,
                        ..default.widgets.active.fg_stroke
                    },
                    ..default.widgets.active
                },
                open: WidgetVisuals {
                    bg_fill: palette.surface,
                    weak_bg_fill: palette.background_raise,
                    bg_stroke: Stroke { color: palette.accent, ..default.widgets.open.bg_stroke },
                    fg_stroke: Stroke { color: palette.foreground, ..default.widgets.open.fg_stroke },
                    ..default.widgets.open
                },
            },
            selection: Selection {
                bg_fill: palette.highlight,
                stroke: Stroke { color: palette.foreground, ..default.selection.stroke },
            },
            hyperlink_color: palette.accent,
            faint_bg_color: match is_dark {
                true => palette.background_dim,
                false => palette.surface,
            },
            extreme_bg_color: palette.background_dim,
            code_bg_color: palette.surface,
            error_fg_color: palette.err,
            warn_fg_color: palette.warn,
            window_shadow: Shadow { color: palette.background_dim, ..default.window_shadow },
            window_fill: palette.background,
            window_stroke: Stroke { color: palette.background_raise, ..default.window_stroke },
            panel_fill: palette.surface,
            popup_shadow: Shadow { color: palette.surface, ..default.popup_shadow },
            collapsing_header_frame: true,
            ..default
        },
    );

    ctx.all_styles_mut(|style| {
        style.interaction.tooltip_delay = 0.0;
        style.interaction.show_tooltips_only_when_still = false;
    });
}

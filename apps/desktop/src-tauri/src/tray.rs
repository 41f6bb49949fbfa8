//! Tray icon and menu: the app's entire command surface.
//!
//! Every item maps 1:1 to a display-controller or session operation. The
//! size submenu carries a checkmark on the active preset; Mirror is a
//! self-toggling check item.

use tauri::menu::{
    CheckMenuItem, CheckMenuItemBuilder, MenuBuilder, MenuItemBuilder, PredefinedMenuItem,
    SubmenuBuilder,
};
use tauri::tray::TrayIconBuilder;
use tauri::{App, AppHandle, Manager, Runtime};
use tracing::{debug, warn};

use halo_core::SizePreset;

use crate::AppState;

const SHOW_ID: &str = "show";
const HIDE_ID: &str = "hide";
const STOP_ID: &str = "stop";
const MIRROR_ID: &str = "mirror";

fn size_id(preset: SizePreset) -> String {
    format!("size-{}", preset.side() as u32)
}

fn preset_from_id(id: &str) -> Option<SizePreset> {
    let side: u32 = id.strip_prefix("size-")?.parse().ok()?;
    SizePreset::ALL.into_iter().find(|p| p.side() as u32 == side)
}

pub fn init(app: &App) -> tauri::Result<()> {
    let show = MenuItemBuilder::with_id(SHOW_ID, "Show Camera").build(app)?;
    let hide = MenuItemBuilder::with_id(HIDE_ID, "Hide Camera").build(app)?;
    let stop = MenuItemBuilder::with_id(STOP_ID, "Stop Camera").build(app)?;

    let size_items: Vec<CheckMenuItem<_>> = SizePreset::ALL
        .into_iter()
        .map(|preset| {
            CheckMenuItemBuilder::with_id(size_id(preset), preset.label())
                .checked(preset == SizePreset::default())
                .build(app)
        })
        .collect::<Result<_, _>>()?;

    let mut sizes = SubmenuBuilder::new(app, "Window Size");
    for item in &size_items {
        sizes = sizes.item(item);
    }
    let sizes = sizes.build()?;

    let mirror = CheckMenuItemBuilder::with_id(MIRROR_ID, "Mirror")
        .checked(false)
        .build(app)?;
    let quit = PredefinedMenuItem::quit(app, Some("Quit"))?;

    let menu = MenuBuilder::new(app)
        .item(&show)
        .item(&hide)
        .item(&stop)
        .separator()
        .item(&sizes)
        .separator()
        .item(&mirror)
        .separator()
        .item(&quit)
        .build()?;

    let mut tray = TrayIconBuilder::with_id("halo-tray")
        .menu(&menu)
        .show_menu_on_left_click(true)
        .tooltip("Halo")
        .on_menu_event(move |app, event| {
            on_menu_event(app, event.id().as_ref(), &mirror, &size_items)
        });
    if let Some(icon) = app.default_window_icon() {
        tray = tray.icon(icon.clone());
    }
    tray.build(app)?;

    Ok(())
}

fn on_menu_event<R: Runtime>(
    app: &AppHandle<R>,
    id: &str,
    mirror: &CheckMenuItem<R>,
    size_items: &[CheckMenuItem<R>],
) {
    let state = app.state::<AppState>();
    match id {
        SHOW_ID => state.display().show(),
        HIDE_ID => state.display().hide(),
        STOP_ID => state.display().stop(),
        MIRROR_ID => {
            // The check item toggles itself; read it back and apply.
            let mirrored = mirror.is_checked().unwrap_or(false);
            state.display().set_mirrored(mirrored);
        }
        other => match preset_from_id(other) {
            Some(preset) => {
                state.display().resize(preset);
                for item in size_items {
                    let active = item.id().as_ref() == other;
                    if let Err(e) = item.set_checked(active) {
                        warn!("failed to update size checkmark: {e}");
                    }
                }
            }
            None => debug!("unhandled menu item: {other}"),
        },
    }
}

use bevy::{
    prelude::*,
    tasks::futures_lite::future,
};

use pause_menu::prelude::*;

const SETTINGS_ENV: &str = "PAUSE_MENU_SETTINGS";
const DIFFICULTIES: [&str; 4] = ["Easy", "Normal", "Hard", "Brutal"];
const MUSIC_SLIDER_JSON: &str = r#"{ "label": "Music", "type": "slider", "max": 10, "value": 7 }"#;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(PauseMenuPlugin)
        .add_systems(Startup, (setup, build_showcase_menu).chain())
        .add_systems(Update, toggle_menu.before(MenuSystems::Input))
        .add_systems(
            Update,
            (log_menu_events, log_menu_feedback).after(MenuSystems::Publish),
        )
        .run();
}

fn setup(mut commands: Commands, mut settings: ResMut<MenuSettings>) {
    commands.spawn(Camera2d);
    if let Ok(path) = std::env::var(SETTINGS_ENV) {
        *settings = MenuSettings::load_or_default(path);
    }
}

fn next_difficulty(request: &ValueRequest) -> String {
    let current = DIFFICULTIES
        .iter()
        .position(|name| *name == request.current)
        .unwrap_or(0);
    let len = DIFFICULTIES.len() as i32;
    let next = (current as i32 + request.direction.sign()).rem_euclid(len);
    DIFFICULTIES[next as usize].to_string()
}

fn game_tab(menu: &PauseMenu, sync: &mut SyncChannel) -> Result<MenuTab, MenuUsageError> {
    let mut tab = menu
        .new_tab("Game", TextureRef::new("pause_menu", "tab_game"))
        .with_tint(HUD_FREEMODE);

    let mut graphics = menu.new_column("Graphics");
    graphics.add_item(
        MenuItem::list(
            "Resolution",
            vec!["1280x720".into(), "1920x1080".into(), "2560x1440".into()],
            1,
        )?
        .with_description("Output resolution"),
        sync,
    );
    graphics.add_item(MenuItem::checkbox("VSync", true), sync);
    graphics.add_item(MenuItem::slider("Brightness", 20, 1, 10)?.with_heritage(true), sync);

    tab.add_item(
        MenuItem::new("Resume")
            .with_right_label("F1")?
            .with_description("Back to the game"),
        sync,
    );
    tab.add_item(
        MenuItem::new("Graphics")
            .with_description("Display options")
            .with_sub_column(graphics, true, true),
        sync,
    );
    tab.add_item(MenuItem::separator("", true), sync);

    let mut rich = MenuItem::new("Bounty")
        .with_right_label("$500")?
        .with_tints(Tint::from_random_values(), HUD_GOLD);
    rich.set_left_badge(Some(Badge::new(TextureRef::new("commonmenu", "shop_tick"))))?;
    rich.set_description(1, Description::new("Claim before midnight").with_tint(HUD_RED))?;
    rich.important = Some(Important {
        tint: HUD_ORANGE,
        animate: true,
    });
    tab.add_item(rich.with_description("Outstanding reward"), sync);
    tab.add_item(MenuItem::checkbox("Subtitles", false), sync);
    Ok(tab)
}

fn settings_tab(menu: &PauseMenu, sync: &mut SyncChannel) -> Result<MenuTab, MenuUsageError> {
    let mut tab = menu.new_tab("Settings", TextureRef::new("pause_menu", "tab_settings"));

    let immediate = DynamicValueResolver::immediate(next_difficulty);
    tab.add_item(
        MenuItem::dynamic_list("Difficulty", DIFFICULTIES[1], immediate)
            .with_description("Applies to new encounters"),
        sync,
    );
    let deferred = DynamicValueResolver::new(|request: ValueRequest| async move {
        future::yield_now().await;
        future::yield_now().await;
        next_difficulty(&request)
    });
    tab.add_item(
        MenuItem::dynamic_list("AI aggression", DIFFICULTIES[0], deferred),
        sync,
    );
    tab.add_item(MenuItem::separator("Audio", false), sync);
    match ItemOptions::from_json_str(MUSIC_SLIDER_JSON) {
        Ok(options) => {
            tab.add_item(options.build(None)?, sync);
        }
        Err(error) => warn!("skipping music slider: {error}"),
    }
    tab.add_item(
        MenuItem::progress("Download", 100, 5, 35)?
            .with_bar_tint(HUD_GREY)
            .with_enabled(false),
        sync,
    );
    Ok(tab)
}

fn populate_showcase(menu: &mut PauseMenu) -> Result<(), MenuUsageError> {
    let mut sync = SyncChannel::default();
    let game = game_tab(menu, &mut sync)?;
    let settings = settings_tab(menu, &mut sync)?;
    menu.add_tab(game);
    menu.add_tab(settings);
    menu.set_tab_warning(
        1,
        Some(TabWarning {
            tint: HUD_RED,
            animate: false,
        }),
    );
    Ok(())
}

fn build_showcase_menu(mut commands: Commands, settings: Res<MenuSettings>) {
    let mut menu = PauseMenu::from_settings(settings.clone());
    if let Err(error) = populate_showcase(&mut menu) {
        error!("could not build showcase menu: {error}");
    }
    info!("press F1 to open the pause menu");
    commands.insert_resource(menu);
}

fn toggle_menu(keys: Res<ButtonInput<KeyCode>>, mut menu: ResMut<PauseMenu>) {
    if !keys.just_pressed(KeyCode::F1) {
        return;
    }
    if menu.is_visible() {
        menu.hide();
    } else if let Err(error) = menu.show(Box::new(LogSurface::default())) {
        warn!("pause menu: {error}");
    }
}

fn log_menu_events(mut events: MessageReader<MenuEvent>) {
    for event in events.read() {
        info!("menu event: {event:?}");
    }
}

fn log_menu_feedback(mut feedback: MessageReader<MenuFeedback>) {
    for cue in feedback.read() {
        debug!(
            "menu sound {}/{}",
            FeedbackSound::SOUND_SET,
            cue.sound.sound_name()
        );
    }
}

use egui::{PointerButton, pos2};
use image::Rgb;
use mini_paint::color::{BLACK, WHITE, parse_hex};
use mini_paint::{InputEvent, PaintApp, PaintConfig, ToolKind};

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let config = PaintConfig {
        primary: "not a color".to_owned(),
        ..PaintConfig::default()
    };
    let app = PaintApp::from_config(&config);
    assert_eq!(app.controller().primary(), BLACK);
    assert_eq!(app.controller().surface().width(), 1600);
    assert_eq!(app.palette().len(), 28);
    assert_eq!(app.palette()[16], parse_hex("#FF0000").unwrap());
}

#[test]
fn test_config_sizes_the_sheet() {
    let config = PaintConfig::from_json(r##"{ "width": 10, "height": 10, "secondary": "#00FF00" }"##).unwrap();
    let app = PaintApp::from_config(&config);
    assert_eq!(app.controller().surface().width(), 10);
    assert_eq!(app.controller().secondary(), Rgb([0, 255, 0]));
}

#[test]
fn test_bordered_fill_stays_inside() {
    let config = PaintConfig {
        width: 10,
        height: 10,
        stroke_width: 1,
        ..PaintConfig::default()
    };
    let mut app = PaintApp::from_config(&config);
    let controller = app.controller_mut();
    let red = Rgb([255, 0, 0]);

    controller.set_tool(ToolKind::Rect);
    for event in [
        InputEvent::PointerDown { pos: pos2(2.0, 2.0), button: PointerButton::Primary },
        InputEvent::PointerUp { pos: pos2(7.0, 7.0), button: PointerButton::Primary },
    ] {
        controller.handle_event(&event).unwrap();
    }
    controller.set_tool(ToolKind::Fill);
    controller.set_primary(red);
    for event in [
        InputEvent::PointerDown { pos: pos2(4.5, 4.5), button: PointerButton::Primary },
        InputEvent::PointerUp { pos: pos2(4.5, 4.5), button: PointerButton::Primary },
    ] {
        controller.handle_event(&event).unwrap();
    }

    let surface = controller.surface();
    for y in 0..10 {
        for x in 0..10 {
            let [r, g, b, _] = surface.get_pixel(x, y).unwrap().0;
            let expected = if (3..=6).contains(&x) && (3..=6).contains(&y) {
                red
            } else if (2..=7).contains(&x) && (2..=7).contains(&y) {
                BLACK
            } else {
                WHITE
            };
            assert_eq!(Rgb([r, g, b]), expected, "pixel ({x}, {y})");
        }
    }
    assert_eq!(controller.history().undo_len(), 2);
}

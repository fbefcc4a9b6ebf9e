use glam::Vec2;
use render::{rasterize, Color, Frame, Scene, Shape, TextCanvas};

fn cart_scene() -> Scene {
    let mut scene = Scene::new(600.0, 400.0);
    scene
        .push(Shape::Line {
            from: Vec2::new(0.0, 100.0),
            to: Vec2::new(600.0, 100.0),
            color: Color::BLACK,
        })
        .push(Shape::Rect {
            center: Vec2::new(300.0, 100.0),
            half_extents: Vec2::new(25.0, 15.0),
            color: Color::rgb(10, 20, 30),
        });
    scene
}

#[test]
fn raster_has_requested_dimensions() {
    let img = rasterize(&cart_scene(), 600, 400);
    assert_eq!(img.dimensions(), (600, 400));
    assert_eq!(Frame::Rgb(img).dimensions(), (600, 400));
}

#[test]
fn raster_flips_y_axis() {
    let img = rasterize(&cart_scene(), 600, 400);
    // scene y = 100 is 100 pixels above the bottom row
    assert_eq!(img.get_pixel(300, 400 - 1 - 100).0, [10, 20, 30]);
    assert_eq!(img.get_pixel(300, 10).0, Color::WHITE.0);
    assert_eq!(img.get_pixel(5, 400 - 1 - 100).0, Color::BLACK.0);
}

#[test]
fn raster_scales_scene_to_output() {
    let img = rasterize(&cart_scene(), 300, 200);
    assert_eq!(img.get_pixel(150, 200 - 1 - 50).0, [10, 20, 30]);
}

#[test]
fn text_canvas_grid_shape() {
    let canvas = TextCanvas::new(30, 10);
    let text = canvas.draw(&cart_scene());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert!(lines.iter().all(|l| l.chars().count() == 30));
    assert!(text.contains('#'), "cart should be visible:\n{text}");
    assert_eq!(Frame::Text(text).dimensions(), (30, 10));
}

#[test]
fn empty_scene_is_blank() {
    let text = TextCanvas::new(4, 2).draw(&Scene::new(4.0, 2.0));
    assert_eq!(text, "    \n    \n");
}

//! Rendering tests against a local HTTP server.

use eventcard::card::{CardFormat, CardSize};
use eventcard::{CardError, CardRenderer, Config, EventRecord};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::thread;
use tiny_http::{Header, Response, Server};

/// Serves `/poster.png` and answers 404 for everything else.
fn start_image_server() -> String {
    let mut png = Vec::new();
    RgbImage::from_pixel(1200, 800, Rgb([200, 30, 30]))
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();

    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = match request.url() {
                "/poster.png" => Response::from_data(png.clone()).with_header(
                    "Content-Type: image/png".parse::<Header>().unwrap(),
                ),
                _ => Response::from_data(b"Not Found".to_vec()).with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    format!("http://{addr}")
}

fn test_renderer() -> CardRenderer {
    let mut config = Config::default();
    config.fonts.family = "sans".into();
    config.fetch.timeout_secs = 5;
    CardRenderer::new(config).unwrap()
}

fn event(image: String) -> EventRecord {
    EventRecord {
        image,
        title: "CONCERT AU JARDIN 🎶".into(),
        date: "JEUDI - 19H".into(),
        event_type: Some("Concert".into()),
        description_short: Some("Musique live ✨ et food trucks".into()),
        description_long: Some("Musique live ✨ et food trucks. ".repeat(12)),
        cost: Some("10 €".into()),
        location: Some("Jardin des Plantes".into()),
        ..Default::default()
    }
}

#[test]
fn remote_image_renders_card_of_requested_size() {
    let base = start_image_server();
    let renderer = test_renderer();

    let mut card = renderer
        .render(&event(format!("{base}/poster.png")), CardSize::new(1080, 1350))
        .unwrap();
    assert_eq!(card.format, CardFormat::Standard);
    assert_eq!((card.width(), card.height()), (1080, 1350));

    let pixels = card.to_rgb().unwrap();
    // Top of the card is the fetched image
    assert_eq!(pixels.get_pixel(540, 10), &Rgb([200, 30, 30]));
    // Bottom-right corner is past the right margin and below the content
    assert_eq!(pixels.get_pixel(1070, 1340), &Rgb([255, 255, 255]));
}

#[test]
fn banner_uses_day_color() {
    let base = start_image_server();
    let renderer = test_renderer();

    let mut card = renderer
        .render(&event(format!("{base}/poster.png")), CardSize::new(1080, 1350))
        .unwrap();
    let pixels = card.to_rgb().unwrap();
    // Image is scaled to 1080x720 and cut at 600, so the banner spans
    // 620..710 at the left edge; the date is centered, leaving x=60 plain
    assert_eq!(pixels.get_pixel(60, 670), &Rgb([66, 165, 245]));
    assert_eq!(pixels.get_pixel(540, 590), &Rgb([200, 30, 30]));
}

#[test]
fn http_error_is_reported_with_status() {
    let base = start_image_server();
    let renderer = test_renderer();

    let err = renderer
        .render(&event(format!("{base}/missing.png")), CardSize::new(1080, 1350))
        .err()
        .unwrap();
    match err {
        CardError::HttpStatus { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/missing.png"));
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[test]
fn story_card_renders_tall_format() {
    let base = start_image_server();
    let renderer = test_renderer();

    let mut card = renderer
        .render(&event(format!("{base}/poster.png")), CardSize::new(1080, 1920))
        .unwrap();
    assert_eq!(card.format, CardFormat::Story);
    assert_eq!((card.width(), card.height()), (1080, 1920));

    let pixels = card.to_rgb().unwrap();
    // Gradient starts at the thursday color in the top-left corner
    assert_eq!(pixels.get_pixel(5, 0), &Rgb([66, 165, 245]));
    // Image follows the text and never reaches the bottom margin
    let red = Rgb([200, 30, 30]);
    assert!((400..1900).any(|y| pixels.get_pixel(540, y) == &red));
    assert_eq!(pixels.get_pixel(540, 1915), &Rgb([255, 255, 255]));
}

#[test]
fn sparse_event_with_emoji_only_title_renders() {
    let base = start_image_server();
    let renderer = test_renderer();
    let event = EventRecord {
        image: format!("{base}/poster.png"),
        title: "🎉🎶💃".into(),
        ..Default::default()
    };

    let card = renderer.render(&event, CardSize::new(800, 1000)).unwrap();
    assert_eq!((card.width(), card.height()), (800, 1000));
}

#[test]
fn render_to_file_writes_nothing_on_fetch_failure() {
    let base = start_image_server();
    let renderer = test_renderer();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.jpg");

    assert!(
        renderer
            .render_to_file(&event(format!("{base}/gone.png")), CardSize::new(1080, 1350), &path)
            .is_err()
    );
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn story_without_room_for_image_still_renders() {
    let mut config = Config::default();
    config.fonts.family = "sans".into();
    // Only 120px above the margin; the text alone runs well past that
    config.story.bottom_margin = 1800;
    let renderer = CardRenderer::new(config).unwrap();

    let poster = Rgb([10, 200, 10]);
    let image = RgbImage::from_pixel(1080, 800, poster);
    let mut card = renderer
        .render_with_image(&event("unused.png".into()), &image, CardSize::new(1080, 1920))
        .unwrap();
    assert_eq!(card.format, CardFormat::Story);
    assert_eq!((card.width(), card.height()), (1080, 1920));

    let pixels = card.to_rgb().unwrap();
    assert!(!pixels.pixels().any(|p| *p == poster));
    assert_eq!(pixels.get_pixel(540, 1900), &Rgb([255, 255, 255]));
}

use super::unit;
use crate::render::fmt_num;
use rand::Rng;
use serde::Serialize;

pub const BAND_CANDIDATES: usize = 2000;
pub const AMBIENT_STAR_COUNT: usize = 150;
pub const BRIGHT_STAR_COUNT: usize = 20;

const BASE_FILL: &str = "#01010a";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Meteor {
    pub x: f32,
    pub y: f32,
    pub length: f32,
    /// Degrees, rotated around the start point.
    pub angle: f32,
}

/// Diagonal strip `|y - (slope * x + intercept)| < width / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GalaxyBand {
    pub slope: f32,
    pub intercept: f32,
    pub width: f32,
}

impl GalaxyBand {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let line_y = self.slope * x + self.intercept;
        (y - line_y).abs() < self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarfieldScene {
    pub width: f32,
    pub height: f32,
    pub noise_seed: u32,
    pub gradient_rotation: f32,
    pub band: GalaxyBand,
    pub band_stars: Vec<Star>,
    pub ambient_stars: Vec<Star>,
    pub bright_stars: Vec<Star>,
    pub meteors: Vec<Meteor>,
}

pub fn compute_starfield<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> StarfieldScene {
    let noise_seed = rng.gen_range(0..1000);
    let gradient_rotation = unit(rng) * 360.0;

    let band = GalaxyBand {
        slope: (unit(rng) - 0.5) * 0.8,
        intercept: height / 2.0 + (unit(rng) - 0.5) * (height * 0.4),
        width: height * (unit(rng) * 0.2 + 0.3),
    };

    let mut band_stars = Vec::new();
    for _ in 0..BAND_CANDIDATES {
        let x = unit(rng) * width;
        let y = unit(rng) * height;
        if band.contains(x, y) {
            band_stars.push(Star {
                x,
                y,
                radius: unit(rng) * 0.5 + 0.1,
                opacity: unit(rng) * 0.7 + 0.2,
            });
        }
    }

    let ambient_stars = (0..AMBIENT_STAR_COUNT)
        .map(|_| Star {
            x: unit(rng) * width,
            y: unit(rng) * height,
            radius: unit(rng) * 0.6 + 0.2,
            opacity: unit(rng) * 0.6 + 0.2,
        })
        .collect();

    let bright_stars = (0..BRIGHT_STAR_COUNT)
        .map(|_| {
            let radius = unit(rng) + 0.4;
            Star {
                x: unit(rng) * width,
                y: unit(rng) * height,
                radius,
                opacity: unit(rng) * 0.4 + 0.6,
            }
        })
        .collect();

    let meteor_count = rng.gen_range(1..=3);
    let meteors = (0..meteor_count)
        .map(|_| Meteor {
            x: unit(rng) * width,
            y: unit(rng) * height,
            length: unit(rng) * 100.0 + 50.0,
            angle: (unit(rng) - 0.5) * 80.0,
        })
        .collect();

    StarfieldScene {
        width,
        height,
        noise_seed,
        gradient_rotation,
        band,
        band_stars,
        ambient_stars,
        bright_stars,
        meteors,
    }
}

pub fn render_starfield(scene: &StarfieldScene) -> String {
    let width = fmt_num(scene.width);
    let height = fmt_num(scene.height);
    let mut svg = String::new();

    svg.push_str("<defs>");
    svg.push_str(
        "<filter id=\"starGlow\"><feGaussianBlur stdDeviation=\"1.5\" result=\"coloredBlur\" /></filter>",
    );
    svg.push_str(&format!(
        "<filter id=\"nebulaCloud\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
<feTurbulence type=\"fractalNoise\" baseFrequency=\"0.02 0.05\" numOctaves=\"4\" seed=\"{}\" result=\"turbulence\" />\
<feGaussianBlur in=\"turbulence\" stdDeviation=\"15\" result=\"softTurbulence\" />\
<feColorMatrix in=\"softTurbulence\" type=\"matrix\" values=\"1 0 0 0 0 0 1 0 0 0 0 0 1 0 0 0 0 0 2 -0.3\" result=\"alphaChannel\" />\
</filter>",
        scene.noise_seed
    ));
    svg.push_str(&format!(
        "<linearGradient id=\"galaxyGradient\" gradientTransform=\"rotate({})\">\
<stop offset=\"20%\" stop-color=\"#2d0e4d\" /><stop offset=\"45%\" stop-color=\"#c1a2ff\" />\
<stop offset=\"50%\" stop-color=\"#f0e8ff\" /><stop offset=\"55%\" stop-color=\"#c1a2ff\" />\
<stop offset=\"80%\" stop-color=\"#2d0e4d\" /></linearGradient>",
        fmt_num(scene.gradient_rotation)
    ));
    svg.push_str(&format!(
        "<mask id=\"galaxyMask\"><rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"white\" />\
<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"black\" filter=\"url(#nebulaCloud)\" /></mask>"
    ));
    svg.push_str(
        "<linearGradient id=\"meteorGradient\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">\
<stop offset=\"0%\" stop-color=\"rgba(200, 225, 255, 0)\" /><stop offset=\"50%\" stop-color=\"rgba(200, 225, 255, 0.8)\" />\
<stop offset=\"100%\" stop-color=\"#fff\" /></linearGradient>",
    );
    svg.push_str("</defs>");

    svg.push_str(&format!(
        "<rect width=\"{width}\" height=\"{height}\" fill=\"{BASE_FILL}\" />"
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"url(#galaxyGradient)\" mask=\"url(#galaxyMask)\" opacity=\"0.6\" />"
    ));

    for star in &scene.band_stars {
        push_star(&mut svg, star, "#fff", None);
    }
    for star in &scene.ambient_stars {
        push_star(&mut svg, star, "#e0e8ff", None);
    }
    for star in &scene.bright_stars {
        push_star(&mut svg, star, "#f0f8ff", Some("starGlow"));
    }
    for meteor in &scene.meteors {
        let x = fmt_num(meteor.x);
        let y = fmt_num(meteor.y);
        svg.push_str(&format!(
            "<line x1=\"{x}\" y1=\"{y}\" x2=\"{}\" y2=\"{y}\" stroke=\"url(#meteorGradient)\" stroke-width=\"1.2\" transform=\"rotate({} {x} {y})\" />",
            fmt_num(meteor.x + meteor.length),
            fmt_num(meteor.angle)
        ));
    }
    svg
}

fn push_star(svg: &mut String, star: &Star, fill: &str, filter: Option<&str>) {
    let filter_attr = filter
        .map(|id| format!(" filter=\"url(#{id})\""))
        .unwrap_or_default();
    svg.push_str(&format!(
        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\"{filter_attr} opacity=\"{}\" />",
        fmt_num(star.x),
        fmt_num(star.y),
        fmt_num(star.radius),
        fmt_num(star.opacity)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fixed_counts_and_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = compute_starfield(800.0, 200.0, &mut rng);
        assert_eq!(scene.ambient_stars.len(), AMBIENT_STAR_COUNT);
        assert_eq!(scene.bright_stars.len(), BRIGHT_STAR_COUNT);
        assert!((1..=3).contains(&scene.meteors.len()));
        assert!(scene.band_stars.len() <= BAND_CANDIDATES);
        assert!(scene.noise_seed < 1000);

        for star in &scene.band_stars {
            assert!(scene.band.contains(star.x, star.y));
            assert!((0.1..=0.6).contains(&star.radius));
            assert!((0.2..=0.9).contains(&star.opacity));
        }
        for star in &scene.bright_stars {
            assert!((0.4..=1.4).contains(&star.radius));
            assert!(star.opacity >= 0.6);
        }
        for meteor in &scene.meteors {
            assert!((50.0..=150.0).contains(&meteor.length));
            assert!((-40.0..=40.0).contains(&meteor.angle));
        }
    }

    #[test]
    fn band_membership() {
        let band = GalaxyBand {
            slope: 0.0,
            intercept: 100.0,
            width: 40.0,
        };
        assert!(band.contains(10.0, 100.0));
        assert!(band.contains(10.0, 119.0));
        assert!(!band.contains(10.0, 120.0));
        assert!(!band.contains(10.0, 70.0));
    }

    #[test]
    fn same_seed_same_scene() {
        let a = compute_starfield(800.0, 300.0, &mut StdRng::seed_from_u64(9));
        let b = compute_starfield(800.0, 300.0, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn renders_every_star_and_meteor() {
        let mut rng = StdRng::seed_from_u64(5);
        let scene = compute_starfield(800.0, 300.0, &mut rng);
        let svg = render_starfield(&scene);
        let expected =
            scene.band_stars.len() + scene.ambient_stars.len() + scene.bright_stars.len();
        assert_eq!(svg.matches("<circle ").count(), expected);
        assert_eq!(svg.matches("<line ").count(), scene.meteors.len());
        assert_eq!(
            svg.matches("filter=\"url(#starGlow)\"").count(),
            BRIGHT_STAR_COUNT
        );
        assert!(svg.contains(&format!("seed=\"{}\"", scene.noise_seed)));
    }
}

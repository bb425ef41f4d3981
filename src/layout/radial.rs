use std::f64::consts::PI;

use super::{Canvas, LayoutNode, NodeRole, Point, RadialLayout, ELLIPSIS};
use crate::config::LayoutConfig;
use crate::graph::ResolvedLink;

/// Angle of satellite `i` out of `count`, in radians. `count == 0` is treated
/// as a divisor of 1.
pub fn satellite_angle(i: usize, count: usize) -> f64 {
    let n = count.max(1);
    2.0 * PI * i as f64 / n as f64
}

/// Shorten `label` to at most `max_chars` characters, ending in an ellipsis.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// Place the center node at the canvas midpoint and the satellites on a circle
/// of radius `radius_factor * min(width, height)` around it, in input order.
pub fn layout(
    center_key: &str,
    center_label: &str,
    satellites: &[ResolvedLink],
    config: &LayoutConfig,
) -> RadialLayout {
    let canvas = Canvas {
        width: config.width,
        height: config.height,
    };
    let mid = canvas.midpoint();
    let radius = config.width.min(config.height) * config.radius_factor;

    let center = LayoutNode {
        key: center_key.to_string(),
        label: center_label.to_string(),
        display_label: center_label.to_string(),
        role: NodeRole::Center,
        position: mid,
    };

    let count = satellites.len();
    let satellites = satellites
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let theta = satellite_angle(i, count);
            LayoutNode {
                key: link.key.clone(),
                label: link.label.clone(),
                display_label: truncate_label(&link.label, config.label_max_chars),
                role: link.role.into(),
                position: Point {
                    x: mid.x + radius * theta.cos(),
                    y: mid.y + radius * theta.sin(),
                },
            }
        })
        .collect();

    RadialLayout {
        canvas,
        radius,
        center,
        satellites,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LinkRole;

    const EPS: f64 = 1e-9;

    fn link(key: &str, label: &str, role: LinkRole) -> ResolvedLink {
        ResolvedLink {
            key: key.to_string(),
            label: label.to_string(),
            role,
        }
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn test_four_satellites_on_quarter_turns() {
        let config = LayoutConfig::default();
        let links: Vec<_> = (0..4)
            .map(|i| link(&format!("scout:{}", i), "S", LinkRole::Known))
            .collect();
        let result = layout("den:1", "Den", &links, &config);

        let expected_angles = [0.0, PI / 2.0, PI, 3.0 * PI / 2.0];
        for (i, angle) in expected_angles.iter().enumerate() {
            assert!((satellite_angle(i, 4) - angle).abs() < EPS);
        }

        // 680 x 420 canvas: center (340, 210), radius 0.33 * 420
        let r = 420.0 * 0.33;
        assert!((result.radius - r).abs() < EPS);
        assert!(close(result.center.position, Point { x: 340.0, y: 210.0 }));
        assert!(close(result.satellites[0].position, Point { x: 340.0 + r, y: 210.0 }));
        assert!(close(result.satellites[1].position, Point { x: 340.0, y: 210.0 + r }));
        assert!(close(result.satellites[2].position, Point { x: 340.0 - r, y: 210.0 }));
        assert!(close(result.satellites[3].position, Point { x: 340.0, y: 210.0 - r }));
    }

    #[test]
    fn test_zero_satellites_center_only() {
        let result = layout("den:1", "Den", &[], &LayoutConfig::default());
        assert!(result.satellites.is_empty());
        assert_eq!(result.edges().count(), 0);
        assert_eq!(result.center.role, NodeRole::Center);
        assert_eq!(satellite_angle(0, 0), 0.0);
        assert!(satellite_angle(1, 0).is_finite());
    }

    #[test]
    fn test_roles_carried_through() {
        let links = vec![
            link("missing:9", "missing:9", LinkRole::Missing),
            link("pack:1", "Troop Alpha", LinkRole::Known),
        ];
        let result = layout("den:1", "Den", &links, &LayoutConfig::default());
        assert_eq!(result.satellites[0].role, NodeRole::Missing);
        assert_eq!(result.satellites[1].role, NodeRole::Known);
        assert_eq!(result.edges().count(), 2);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 28), "short");
        let exact = "a".repeat(28);
        assert_eq!(truncate_label(&exact, 28), exact);

        let long = "b".repeat(29);
        let cut = truncate_label(&long, 28);
        assert_eq!(cut.chars().count(), 28);
        assert!(cut.starts_with(&"b".repeat(27)));
        assert!(cut.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_truncate_label_counts_chars_not_bytes() {
        let label = "é".repeat(30);
        let cut = truncate_label(&label, 28);
        assert_eq!(cut.chars().count(), 28);
    }

    #[test]
    fn test_long_labels_truncated_only_for_display() {
        let long = "The Very Long Name Of A Scout Den".to_string();
        let links = vec![link("den:2", &long, LinkRole::Known)];
        let result = layout("pack:1", &long, &links, &LayoutConfig::default());
        let node = &result.satellites[0];
        assert_eq!(node.label, long);
        assert_eq!(node.display_label.chars().count(), 28);
        assert_eq!(result.center.display_label, long);
    }

    #[test]
    fn test_layout_is_reproducible() {
        let links: Vec<_> = (0..7)
            .map(|i| link(&format!("scout:{}", i), "S", LinkRole::Known))
            .collect();
        let config = LayoutConfig::default();
        let a = serde_json::to_string(&layout("den:1", "Den", &links, &config)).unwrap();
        let b = serde_json::to_string(&layout("den:1", "Den", &links, &config)).unwrap();
        assert_eq!(a, b);
    }
}

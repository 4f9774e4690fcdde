//! Collision events and their reduction to scalar/vector features.

use glam::Vec3;

/// A single point of contact within a collision
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Contact position in world space
    pub point: Vec3,

    /// Contact normal
    pub normal: Vec3,

    /// Distance between the colliders at this point: positive while apart,
    /// zero when touching, negative when overlapping
    pub separation: f32,
}

/// Everything the physics step reports for one collision
#[derive(Debug, Clone, Default)]
pub struct CollisionEvent {
    pub contacts: Vec<Contact>,

    /// Total impulse applied to resolve the collision (N·s)
    pub impulse: Vec3,

    /// Relative linear velocity of the two bodies (world units / s)
    pub relative_velocity: Vec3,
}

/// Reduced collision quantities, consumed immediately by the mapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionFeatures {
    pub impulse_magnitude: f32,
    pub relative_velocity_magnitude: f32,

    /// Σ separation over all contacts
    pub separation_total: f32,

    pub average_contact_point: Vec3,

    /// Unit vector, or zero when there are no contacts or the normals cancel
    pub average_contact_normal: Vec3,
}

impl CollisionFeatures {
    /// Reduce an event. No contacts resolves to zero averages, not an error.
    pub fn from_event(event: &CollisionEvent) -> Self {
        let count = event.contacts.len();

        let (point_sum, normal_sum, separation_total) = event.contacts.iter().fold(
            (Vec3::ZERO, Vec3::ZERO, 0.0),
            |(points, normals, separation), c| {
                (points + c.point, normals + c.normal, separation + c.separation)
            },
        );

        let (average_contact_point, average_contact_normal) = if count == 0 {
            (Vec3::ZERO, Vec3::ZERO)
        } else {
            let n = count as f32;
            ((point_sum / n), (normal_sum / n).normalize_or_zero())
        };

        Self {
            impulse_magnitude: event.impulse.length(),
            relative_velocity_magnitude: event.relative_velocity.length(),
            separation_total,
            average_contact_point,
            average_contact_normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(point: Vec3, normal: Vec3, separation: f32) -> Contact {
        Contact {
            point,
            normal,
            separation,
        }
    }

    #[test]
    fn test_magnitudes() {
        let event = CollisionEvent {
            contacts: vec![],
            impulse: Vec3::new(3.0, 4.0, 0.0),
            relative_velocity: Vec3::new(0.0, 0.0, -2.0),
        };
        let features = CollisionFeatures::from_event(&event);

        assert_eq!(features.impulse_magnitude, 5.0);
        assert_eq!(features.relative_velocity_magnitude, 2.0);
    }

    #[test]
    fn test_contact_averages() {
        let event = CollisionEvent {
            contacts: vec![
                contact(Vec3::new(0.0, 0.0, 0.0), Vec3::Y, -0.01),
                contact(Vec3::new(2.0, 0.0, 0.0), Vec3::Y, 0.02),
                contact(Vec3::new(1.0, 3.0, 0.0), Vec3::X, 0.0),
            ],
            ..Default::default()
        };
        let features = CollisionFeatures::from_event(&event);

        assert!((features.separation_total - 0.01).abs() < 1e-6);
        assert_eq!(features.average_contact_point, Vec3::new(1.0, 1.0, 0.0));

        let expected = Vec3::new(1.0, 2.0, 0.0).normalize();
        assert!(features.average_contact_normal.abs_diff_eq(expected, 1e-6));
        assert!((features.average_contact_normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_contacts_resolves_to_zero() {
        let event = CollisionEvent {
            impulse: Vec3::X,
            ..Default::default()
        };
        let features = CollisionFeatures::from_event(&event);

        assert_eq!(features.average_contact_point, Vec3::ZERO);
        assert_eq!(features.average_contact_normal, Vec3::ZERO);
        assert_eq!(features.separation_total, 0.0);
        assert!(features.average_contact_point.is_finite());
    }

    #[test]
    fn test_opposing_normals_resolve_to_zero() {
        let event = CollisionEvent {
            contacts: vec![
                contact(Vec3::ZERO, Vec3::Y, 0.0),
                contact(Vec3::ZERO, Vec3::NEG_Y, 0.0),
            ],
            ..Default::default()
        };

        assert_eq!(
            CollisionFeatures::from_event(&event).average_contact_normal,
            Vec3::ZERO
        );
    }
}

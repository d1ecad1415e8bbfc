use super::{
    narrow_phase,
    types::{ContactRecord, ContactSummary, StaticCollider},
};
use crate::{
    CapsuleCollider, RigidBody,
    settings::{DEFAULT_RESOLVE_ITERATIONS, GROUND_NORMAL_MIN_Y},
};

/// Parameters for a resolver call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolveOptions {
    /// Upper bound on passes over the collider list. Zero disables resolution.
    pub iterations: u32,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_RESOLVE_ITERATIONS,
        }
    }
}

/// Push a capsule body out of a set of static boxes.
///
/// See [`resolve_collisions_with`]; this variant reports nothing per contact.
#[inline]
pub fn resolve_collisions(
    body: &mut RigidBody,
    capsule: &CapsuleCollider,
    colliders: &[StaticCollider],
    options: &ResolveOptions,
) -> ContactSummary {
    resolve_collisions_with(body, capsule, colliders, options, |_| {})
}

/// Push a capsule body out of a set of static boxes, reporting every applied contact.
///
/// Algorithm:
/// - `body.on_ground` is cleared first; only a contact from this call sets it.
/// - Each pass visits every collider in order. A contact moves the body out by
///   its full penetration along the normal and removes the velocity component
///   pointing into the surface (tangential velocity is kept, so the body slides).
/// - Normals with `y > GROUND_NORMAL_MIN_Y` mark the body grounded.
/// - Passes repeat until one finds no contacts or `options.iterations` runs out.
///
/// `on_contact` sees each contact after it has been applied and cannot change
/// the outcome.
pub fn resolve_collisions_with(
    body: &mut RigidBody,
    capsule: &CapsuleCollider,
    colliders: &[StaticCollider],
    options: &ResolveOptions,
    mut on_contact: impl FnMut(&ContactRecord),
) -> ContactSummary {
    let mut summary = ContactSummary::default();
    body.on_ground = false;

    for iteration in 0..options.iterations {
        summary.iterations = iteration + 1;
        let mut had_contact = false;

        for (collider_index, collider) in colliders.iter().enumerate() {
            let Some(contact) =
                narrow_phase::capsule_contact_against_static(&body.position, capsule, collider)
            else {
                continue;
            };

            body.position += contact.normal * contact.penetration;

            let into_surface = body.velocity.dot(&contact.normal);
            if into_surface < 0.0 {
                body.velocity -= contact.normal * into_surface;
            }

            let grounding = contact.normal.y > GROUND_NORMAL_MIN_Y;
            if grounding {
                body.on_ground = true;
                summary.ground_contacts += 1;
            }

            summary.contacts += 1;
            summary.max_penetration = summary.max_penetration.max(contact.penetration);
            had_contact = true;

            on_contact(&ContactRecord {
                collider_index,
                iteration,
                penetration: contact.penetration,
                normal: contact.normal,
                grounding,
            });
        }

        if !had_contact {
            return summary;
        }
    }

    // Every pass found contacts: the budget ran out before the body came free.
    summary.converged = options.iterations == 0;
    if !summary.converged {
        log::trace!(
            "collision resolve exhausted {} passes ({} contacts, max penetration {:.4})",
            options.iterations,
            summary.contacts,
            summary.max_penetration
        );
    }
    summary
}

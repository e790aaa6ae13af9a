//! Physics world and fixed-substep simulation

use crate::body::{Body, BodyIdMask, BodyKey};
use crate::collision::{circle_vs_aabb, circle_vs_circle};
use crate::contact::ContactRegistry;
use crate::shapes::ColliderKind;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

/// Default number of substeps per frame
pub const DEFAULT_SUBSTEPS: u32 = 16;

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Integration/collision passes per frame
    pub substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            substeps: DEFAULT_SUBSTEPS,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given substep count
    pub fn new(substeps: u32) -> Self {
        Self { substeps }
    }
}

/// The physics world containing all bodies
///
/// Bodies are owned by the world and addressed by [`BodyKey`]. Only enabled
/// bodies take part in the simulation, in the order they were (re-)enabled.
pub struct PhysicsWorld {
    /// All bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, Body>,
    /// Enabled bodies, in simulation order
    active: Vec<BodyKey>,
    /// Contacts of the last step
    contacts: ContactRegistry,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        if config.substeps == 0 {
            log::warn!("Physics configured with 0 substeps, running 1 per frame");
        }
        Self {
            bodies: SlotMap::with_key(),
            active: Vec::new(),
            contacts: ContactRegistry::new(),
            config,
        }
    }

    /// Add a body to the world, enabled, and return its key
    pub fn add_body(&mut self, body: Body) -> BodyKey {
        let key = self.bodies.insert(body);
        self.active.push(key);
        key
    }

    /// Remove a body from the world and return it
    ///
    /// Any contact recorded for it this frame is dropped as well.
    pub fn remove_body(&mut self, key: BodyKey) -> Option<Body> {
        let body = self.bodies.remove(key)?;
        self.active.retain(|&k| k != key);
        self.contacts.retain_without(key);
        Some(body)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut Body> {
        self.bodies.get_mut(key)
    }

    pub fn contains(&self, key: BodyKey) -> bool {
        self.bodies.contains_key(key)
    }

    /// Get the number of bodies in the world, enabled or not
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Get the number of enabled bodies
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Iterate over all bodies
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body)> + '_ {
        self.bodies.iter()
    }

    /// Keys of the enabled bodies, in simulation order
    pub fn active_keys(&self) -> &[BodyKey] {
        &self.active
    }

    /// Include or exclude a body from the simulation
    ///
    /// Used for pooled entities that keep their body while dead. A re-enabled
    /// body goes to the end of the simulation order. Returns `false` if the key
    /// is stale.
    pub fn set_enabled(&mut self, key: BodyKey, enabled: bool) -> bool {
        if !self.bodies.contains_key(key) {
            return false;
        }

        let position = self.active.iter().position(|&k| k == key);
        match (enabled, position) {
            (true, None) => self.active.push(key),
            (false, Some(index)) => {
                self.active.remove(index);
            }
            _ => {}
        }
        true
    }

    pub fn is_enabled(&self, key: BodyKey) -> bool {
        self.active.contains(&key)
    }

    /// Contacts detected by the last [`step`](Self::step)
    pub fn contacts(&self) -> &ContactRegistry {
        &self.contacts
    }

    /// Check if a body rests on a static body
    ///
    /// True when one of this frame's contacts pairs `key` with a static body
    /// and pushed `key` upward.
    pub fn is_grounded(&self, key: BodyKey) -> bool {
        self.contacts.involving(key).any(|(other, normal)| {
            normal.y > 0.0 && self.bodies.get(other).is_some_and(Body::is_static)
        })
    }

    /// Bodies touching `key` this frame whose id is in `mask`
    pub fn touching(&self, key: BodyKey, mask: BodyIdMask) -> impl Iterator<Item = BodyKey> + '_ {
        self.contacts.involving(key).filter_map(move |(other, _)| {
            self.bodies
                .get(other)
                .filter(|body| mask.matches(body.id()))
                .map(|_| other)
        })
    }

    /// Number of integration passes per frame actually used
    pub fn substeps(&self) -> u32 {
        self.config.substeps.max(1)
    }

    /// Step the physics simulation forward by one frame of `frame_dt` seconds
    ///
    /// This performs:
    /// 1. Clearing the contact registry
    /// 2. For each substep: integration of every enabled body, then
    ///    pairwise collision detection and resolution
    pub fn step(&mut self, frame_dt: f32) {
        self.contacts.clear();

        if !frame_dt.is_finite() || frame_dt < 0.0 {
            log::warn!("Skipping physics step with invalid frame time {}", frame_dt);
            return;
        }

        let substeps = self.substeps();
        let sub_dt = frame_dt / substeps as f32;

        for _ in 0..substeps {
            self.integrate_bodies(sub_dt);
            self.resolve_collisions();
        }
    }

    /// Integrate every enabled body
    fn integrate_bodies(&mut self, dt: f32) {
        for &key in &self.active {
            if let Some(body) = self.bodies.get_mut(key) {
                body.integrate(dt);
            }
        }
    }

    /// Test every pair of enabled bodies
    fn resolve_collisions(&mut self) {
        let active = &self.active;
        let bodies = &mut self.bodies;
        let contacts = &mut self.contacts;

        for i in 0..active.len() {
            for j in (i + 1)..active.len() {
                let (key_a, key_b) = (active[i], active[j]);
                let Some([body_a, body_b]) = bodies.get_disjoint_mut([key_a, key_b]) else {
                    continue;
                };

                // Skip if both bodies are static
                if body_a.is_static() && body_b.is_static() {
                    continue;
                }

                match (body_a.collider_kind(), body_b.collider_kind()) {
                    (ColliderKind::Circle, ColliderKind::Circle) => {
                        circle_vs_circle(contacts, (key_a, body_a), (key_b, body_b));
                    }
                    (ColliderKind::Circle, ColliderKind::Aabb) => {
                        circle_vs_aabb(contacts, (key_a, body_a), (key_b, body_b));
                    }
                    (ColliderKind::Aabb, ColliderKind::Circle) => {
                        circle_vs_aabb(contacts, (key_b, body_b), (key_a, body_a));
                    }
                    (kind_a, kind_b) => {
                        log::warn!(
                            "Unhandled: {} vs {} ({} vs {})",
                            kind_a,
                            kind_b,
                            body_a.name(),
                            body_b.name()
                        );
                    }
                }
            }
        }
    }

    /// Log every enabled body and the current contacts at debug level
    pub fn log_state(&self) {
        for &key in &self.active {
            if let Some(body) = self.bodies.get(key) {
                log::debug!("{}", body.describe());
            }
        }
        for (index, contact) in self.contacts.iter().enumerate() {
            let name = |key| self.bodies.get(key).map_or("<removed>", Body::name);
            log::debug!(
                "Collision #{} - {} vs {}: <{:.2}, {:.2}>",
                index,
                name(contact.a),
                name(contact.b),
                contact.normal.x,
                contact.normal.y
            );
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

//! # Particle System Integration Test
//!
//! Emitters and particles are both pooled. An emitter spawns particles for a
//! few frames, then stops; once its last particle dies it removes itself and
//! is recycled in the same frame.
//!
//! Run with: cargo test -p recyclo --test particle_system_test

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use recyclo::prelude::*;
use recyclo::PoolConfig;

#[derive(Default)]
struct Particle {
    life: u32,
    removal: RemovalFlag,
}

impl Steppable for Particle {
    fn step(&mut self) {
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.removal.raise();
        }
    }
}

impl Drawable for Particle {
    fn draw(&self) {}
}

impl Cleanable for Particle {
    fn is_to_be_removed(&self) -> bool {
        self.removal.is_raised()
    }
}

struct Emitter {
    particles: PooledCollection<Particle>,
    bursts_left: u32,
    removal: RemovalFlag,
    draws: Rc<Cell<u32>>,
}

impl Steppable for Emitter {
    fn step(&mut self) {
        if self.bursts_left > 0 {
            self.bursts_left -= 1;
            for _ in 0..4 {
                self.particles.spawn_with(|_| {});
            }
        }
        self.particles.step();
    }
}

impl Drawable for Emitter {
    fn draw(&self) {
        self.draws.set(self.draws.get() + 1);
        self.particles.draw();
    }
}

impl Cleanable for Emitter {
    fn is_to_be_removed(&self) -> bool {
        self.removal.is_raised()
    }

    fn clean(&mut self) {
        self.particles.clean();
        if self.bursts_left == 0 && self.particles.is_empty() {
            self.removal.raise();
        }
    }
}

struct Scene {
    particle_pool: SharedPool<Particle>,
    emitter_pool: SharedPool<Emitter>,
    emitter_draws: Rc<Cell<u32>>,
}

fn build_scene() -> Scene {
    let config = PoolConfig::from_toml_str("initial_capacity = 32\nprewarm = 8").unwrap();
    let particle_pool = ObjectPool::from_config(&config, Particle::default)
        .on_acquire(|p: &mut Particle| {
            p.life = 3;
            p.removal.reset();
        })
        .into_shared();

    let emitter_draws = Rc::new(Cell::new(0));
    let factory_pool = Rc::clone(&particle_pool);
    let factory_draws = Rc::clone(&emitter_draws);
    let emitter_pool = ObjectPool::from_factory(move || Emitter {
        particles: PooledCollection::new(Rc::clone(&factory_pool)),
        bursts_left: 0,
        removal: RemovalFlag::new(),
        draws: Rc::clone(&factory_draws),
    })
    .on_acquire(|e: &mut Emitter| {
        e.bursts_left = 2;
        e.removal.reset();
    })
    .on_release(|e: &mut Emitter| e.particles.recycle_all())
    .into_shared();

    Scene {
        particle_pool,
        emitter_pool,
        emitter_draws,
    }
}

#[test]
fn test_emitter_lifecycle_recycles_everything() {
    let scene = build_scene();
    let mut emitters = PooledCollection::new(Rc::clone(&scene.emitter_pool));
    emitters.spawn_with(|_| {});

    let mut driver = FrameDriver::new();

    // Frames 1-2 burst 4 particles each; particles live 3 frames.
    driver.run_frame(&mut emitters);
    assert_eq!(emitters.get(0).unwrap().particles.len(), 4);

    driver.run_frame(&mut emitters);
    assert_eq!(emitters.get(0).unwrap().particles.len(), 8);

    // Frame 3: first burst dies.
    driver.run_frame(&mut emitters);
    assert_eq!(emitters.get(0).unwrap().particles.len(), 4);

    // Frame 4: second burst dies, emitter empties and is evicted this frame.
    driver.run_frame(&mut emitters);
    assert!(emitters.is_empty());
    assert_eq!(emitters.last_recycled(), 1);
    // Drawn once per frame including the frame it died in.
    assert_eq!(scene.emitter_draws.get(), 4);

    let particle_stats = scene.particle_pool.borrow().stats();
    assert_eq!(particle_stats.outstanding, 0);
    assert_eq!(particle_stats.free, 8);
    assert_eq!(particle_stats.constructed_on_acquire, 0);

    let emitter_stats = scene.emitter_pool.borrow().stats();
    assert_eq!(emitter_stats.outstanding, 0);
    assert_eq!(emitter_stats.free, 1);
}

#[test]
fn test_recycled_emitter_restarts() {
    let scene = build_scene();
    let mut emitters = PooledCollection::new(Rc::clone(&scene.emitter_pool));
    let mut driver = FrameDriver::new();

    emitters.spawn_with(|_| {});
    driver.run_frames(&mut emitters, 4);
    assert!(emitters.is_empty());

    emitters.spawn_with(|_| {});
    driver.run_frame(&mut emitters);

    assert_eq!(emitters.len(), 1);
    assert_eq!(emitters.get(0).unwrap().particles.len(), 4);
    assert_eq!(scene.emitter_pool.borrow().stats().reused, 1);
}

#[test]
fn test_scene_teardown_releases_live_emitters() {
    let scene = build_scene();
    let mut emitters = PooledCollection::new(Rc::clone(&scene.emitter_pool));
    let mut driver = FrameDriver::new();
    for _ in 0..3 {
        emitters.spawn_with(|_| {});
    }
    driver.run_frame(&mut emitters);

    emitters.recycle_all();

    assert!(emitters.is_empty());
    assert_eq!(scene.emitter_pool.borrow().stats().free, 3);
    // Releasing an emitter recycles its particles too.
    assert_eq!(scene.particle_pool.borrow().stats().outstanding, 0);
}

#[test]
fn test_advance_frame_matches_driver() {
    let order = Rc::new(RefCell::new(Vec::new()));

    struct Probe {
        order: Rc<RefCell<Vec<&'static str>>>,
    }
    impl Steppable for Probe {
        fn step(&mut self) {
            self.order.borrow_mut().push("step");
        }
    }
    impl Drawable for Probe {
        fn draw(&self) {
            self.order.borrow_mut().push("draw");
        }
    }
    impl Cleanable for Probe {
        fn is_to_be_removed(&self) -> bool {
            false
        }
        fn clean(&mut self) {
            self.order.borrow_mut().push("clean");
        }
    }

    let mut probe = Probe {
        order: Rc::clone(&order),
    };
    advance_frame(&mut probe);

    assert_eq!(*order.borrow(), vec!["step", "draw", "clean"]);
}

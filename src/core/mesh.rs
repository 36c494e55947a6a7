//! Particle mesh animation
//!
//! A fixed set of points drifts across the canvas, bouncing off the edges.
//! Each frame, nearby pairs are joined by faint links whose opacity falls
//! off linearly with distance, and the closest pairs carry small "packets"
//! sliding along the link. Purely decorative; every operation is total.
//!
//! Drawing goes through [`MeshPainter`] so the same frame logic feeds the
//! egui canvas, the headless CLI and the tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::config::MeshConfig;
use super::frame::{FrameHandle, FrameLoop};

/// Radius of a node dot (px)
pub const NODE_RADIUS: f32 = 2.0;
/// Radius of a packet dot (px)
pub const PACKET_RADIUS: f32 = 1.5;

/// A moving point in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Point {
    pub fn pos(&self) -> [f32; 2] {
        [self.x, self.y]
    }

    fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Render target for one mesh frame
pub trait MeshPainter {
    /// Wipe the previous frame
    fn clear(&mut self);
    /// Link between two points, `opacity` in [0, line_alpha]
    fn link(&mut self, from: [f32; 2], to: [f32; 2], opacity: f32);
    /// Packet travelling along a link
    fn packet(&mut self, at: [f32; 2]);
    /// A mesh point
    fn node(&mut self, at: [f32; 2]);
}

/// What a single render pass drew
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub links: usize,
    pub packets: usize,
    pub nodes: usize,
}

/// Position along a link of the packet for pair (i, j) at time `now` (s).
///
/// The phase `((i*7 + j*13 + now) mod 3) / 3` is visible during its first
/// half, mapped to progress 0..1 along the link.
pub fn packet_progress(i: usize, j: usize, now: f64) -> Option<f32> {
    let phase = ((i * 7 + j * 13) as f64 + now).rem_euclid(3.0) / 3.0;
    if phase < 0.5 {
        Some((phase * 2.0) as f32)
    } else {
        None
    }
}

/// Negate `vel` when `pos` has left [0, extent] moving outward, then clamp.
fn reflect(pos: &mut f32, vel: &mut f32, extent: f32) {
    let extent = extent.max(0.0);
    if (*pos <= 0.0 && *vel < 0.0) || (*pos >= extent && *vel > 0.0) {
        *vel = -*vel;
    }
    *pos = pos.clamp(0.0, extent);
}

/// Point set plus the canvas it lives in
#[derive(Debug, Clone)]
pub struct Mesh {
    config: MeshConfig,
    points: Vec<Point>,
    width: f32,
    height: f32,
}

impl Mesh {
    pub fn new(config: MeshConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn size(&self) -> [f32; 2] {
        [self.width, self.height]
    }

    pub fn is_initialized(&self) -> bool {
        !self.points.is_empty()
    }

    /// Scatter `node_count` points over a `size` canvas.
    ///
    /// No-op when points already exist or the surface has no area.
    /// Returns true if points were created.
    pub fn initialize<R: Rng + ?Sized>(&mut self, size: [f32; 2], rng: &mut R) -> bool {
        if self.is_initialized() {
            return false;
        }
        let [width, height] = size;
        if !(width > 0.0 && height > 0.0) {
            debug!(width, height, "Mesh surface unavailable, skipping init");
            return false;
        }

        self.width = width;
        self.height = height;
        let speed = self.config.max_speed;
        self.points = (0..self.config.node_count)
            .map(|_| Point {
                x: rng.gen::<f32>() * width,
                y: rng.gen::<f32>() * height,
                vx: (rng.gen::<f32>() - 0.5) * 2.0 * speed,
                vy: (rng.gen::<f32>() - 0.5) * 2.0 * speed,
            })
            .collect();

        debug!(nodes = self.points.len(), width, height, "Mesh initialized");
        !self.points.is_empty()
    }

    /// Replace the point set wholesale (fixtures and replays).
    pub fn set_points(&mut self, size: [f32; 2], points: Vec<Point>) {
        self.width = size[0];
        self.height = size[1];
        self.points = points;
    }

    /// Track a new canvas size. Points are left where they are; the next
    /// tick clamps any that ended up outside.
    pub fn resize(&mut self, size: [f32; 2]) {
        let [width, height] = size;
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        if width != self.width || height != self.height {
            debug!(width, height, "Mesh resized");
        }
        self.width = width;
        self.height = height;
    }

    /// Advance every point by its velocity and bounce off the edges.
    pub fn tick(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.points {
            p.x += p.vx;
            p.y += p.vy;
            reflect(&mut p.x, &mut p.vx, width);
            reflect(&mut p.y, &mut p.vy, height);
        }
    }

    /// Draw links, packets and nodes, in that order, after clearing.
    pub fn render<P: MeshPainter + ?Sized>(&self, now: f64, painter: &mut P) -> RenderStats {
        painter.clear();

        let threshold = self.config.connection_distance;
        let packet_dist = threshold * self.config.packet_ratio;
        let mut stats = RenderStats::default();

        // Pairs within range, computed once for links and packets
        let mut near: Vec<(usize, usize, f32)> = Vec::new();
        for (i, a) in self.points.iter().enumerate() {
            for (j, b) in self.points.iter().enumerate().skip(i + 1) {
                let dist = a.distance(b);
                if dist < threshold {
                    near.push((i, j, dist));
                }
            }
        }

        for &(i, j, dist) in &near {
            let opacity = (1.0 - dist / threshold) * self.config.line_alpha;
            painter.link(self.points[i].pos(), self.points[j].pos(), opacity);
            stats.links += 1;
        }

        for &(i, j, dist) in &near {
            if dist >= packet_dist {
                continue;
            }
            if let Some(t) = packet_progress(i, j, now) {
                let (a, b) = (&self.points[i], &self.points[j]);
                painter.packet([a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t]);
                stats.packets += 1;
            }
        }

        for p in &self.points {
            painter.node(p.pos());
            stats.nodes += 1;
        }

        trace!(links = stats.links, packets = stats.packets, "Mesh frame");
        stats
    }
}

/// Mesh bound to a frame loop and a resize subscription.
///
/// `mount` starts the loop, each delivered frame ticks and renders once and
/// re-requests, `unmount` cancels the pending frame and drops the points.
pub struct MeshAnimator<R: Rng = StdRng> {
    mesh: Mesh,
    frames: FrameLoop,
    listening: bool,
    rng: R,
}

impl MeshAnimator<StdRng> {
    pub fn new(config: MeshConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> MeshAnimator<R> {
    pub fn with_rng(config: MeshConfig, rng: R) -> Self {
        Self {
            mesh: Mesh::new(config),
            frames: FrameLoop::new(),
            listening: false,
            rng,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn is_mounted(&self) -> bool {
        self.listening
    }

    /// Subscribe to resizes and request the first frame.
    pub fn mount(&mut self) -> FrameHandle {
        info!(nodes = self.mesh.config().node_count, "Mesh mounted");
        self.listening = true;
        self.frames.request()
    }

    /// Resize notification; ignored while unmounted.
    pub fn on_resize(&mut self, size: [f32; 2]) {
        if self.listening {
            self.mesh.resize(size);
        }
    }

    /// Run the frame for `handle`: lazy init, one tick, one render.
    ///
    /// `surface` is the canvas size, or None when nothing is attached yet.
    /// Returns the handle of the next requested frame, or None if `handle`
    /// was stale or cancelled (nothing is drawn in that case).
    pub fn on_frame<P: MeshPainter + ?Sized>(
        &mut self,
        handle: FrameHandle,
        surface: Option<[f32; 2]>,
        now: f64,
        painter: &mut P,
    ) -> Option<FrameHandle> {
        if !self.frames.fire(handle) {
            trace!(?handle, "Dropping stale mesh frame");
            return None;
        }

        if let Some(size) = surface {
            self.mesh.initialize(size, &mut self.rng);
            if self.mesh.is_initialized() {
                self.mesh.tick();
                self.mesh.render(now, painter);
            }
        }

        Some(self.frames.request())
    }

    /// Cancel the pending frame, stop listening for resizes, drop the points.
    pub fn unmount(&mut self) {
        self.frames.cancel();
        self.listening = false;
        self.mesh.points.clear();
        info!("Mesh unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Link([f32; 2], [f32; 2], f32),
        Packet([f32; 2]),
        Node([f32; 2]),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl MeshPainter for Recorder {
        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }
        fn link(&mut self, from: [f32; 2], to: [f32; 2], opacity: f32) {
            self.calls.push(Call::Link(from, to, opacity));
        }
        fn packet(&mut self, at: [f32; 2]) {
            self.calls.push(Call::Packet(at));
        }
        fn node(&mut self, at: [f32; 2]) {
            self.calls.push(Call::Node(at));
        }
    }

    fn point(x: f32, y: f32, vx: f32, vy: f32) -> Point {
        Point { x, y, vx, vy }
    }

    fn single(size: [f32; 2], p: Point) -> Mesh {
        let mut mesh = Mesh::new(MeshConfig::default());
        mesh.set_points(size, vec![p]);
        mesh
    }

    fn assert_in_bounds(mesh: &Mesh) {
        let [w, h] = mesh.size();
        for p in mesh.points() {
            assert!(p.x >= 0.0 && p.x <= w, "x={} outside [0, {}]", p.x, w);
            assert!(p.y >= 0.0 && p.y <= h, "y={} outside [0, {}]", p.y, h);
        }
    }

    #[test]
    fn test_initialize_creates_points_within_canvas() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut mesh = Mesh::new(MeshConfig::default());
        assert!(mesh.initialize([800.0, 600.0], &mut rng));
        assert_eq!(mesh.points().len(), 40);
        assert_in_bounds(&mesh);
        for p in mesh.points() {
            assert!(p.vx.abs() <= 0.15 && p.vy.abs() <= 0.15);
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut mesh = Mesh::new(MeshConfig::default());
        assert!(mesh.initialize([300.0, 200.0], &mut rng));
        let before = mesh.points().to_vec();
        assert!(!mesh.initialize([900.0, 900.0], &mut rng));
        assert_eq!(mesh.points(), &before[..]);
        assert_eq!(mesh.size(), [300.0, 200.0]);
    }

    #[test]
    fn test_initialize_skipped_without_surface() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut mesh = Mesh::new(MeshConfig::default());
        assert!(!mesh.initialize([0.0, 600.0], &mut rng));
        assert!(!mesh.initialize([800.0, 0.0], &mut rng));
        assert!(!mesh.is_initialized());
    }

    #[test]
    fn test_points_stay_in_bounds_over_many_ticks() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = MeshConfig {
            max_speed: 3.0,
            ..MeshConfig::default()
        };
        let mut mesh = Mesh::new(config);
        mesh.initialize([120.0, 80.0], &mut rng);
        for _ in 0..5_000 {
            mesh.tick();
            assert_in_bounds(&mesh);
        }
    }

    #[test]
    fn test_reflect_right_edge() {
        let mut mesh = single([100.0, 100.0], point(99.9, 50.0, 0.5, 0.0));
        mesh.tick();
        let p = mesh.points()[0];
        assert!(p.vx < 0.0);
        assert_eq!(p.x, 100.0);
    }

    #[test]
    fn test_reflect_exactly_at_right_edge() {
        // 99.875 + 0.125 lands on the edge exactly
        let mut mesh = single([100.0, 100.0], point(99.875, 50.0, 0.125, 0.0));
        mesh.tick();
        let p = mesh.points()[0];
        assert_eq!(p.x, 100.0);
        assert_eq!(p.vx, -0.125);
    }

    #[test]
    fn test_reflect_left_edge() {
        let mut mesh = single([100.0, 100.0], point(0.1, 50.0, -0.5, 0.0));
        mesh.tick();
        let p = mesh.points()[0];
        assert!(p.vx > 0.0);
        assert_eq!(p.x, 0.0);
    }

    #[test]
    fn test_reflect_bottom_edge() {
        let mut mesh = single([100.0, 100.0], point(50.0, 99.9, 0.0, 0.5));
        mesh.tick();
        let p = mesh.points()[0];
        assert!(p.vy < 0.0);
        assert_eq!(p.y, 100.0);
    }

    #[test]
    fn test_reflect_top_edge() {
        let mut mesh = single([100.0, 100.0], point(50.0, 0.1, 0.0, -0.5));
        mesh.tick();
        let p = mesh.points()[0];
        assert!(p.vy > 0.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_reflection_negates_not_recomputes() {
        let mut mesh = single([100.0, 100.0], point(99.9, 0.05, 0.13, -0.07));
        mesh.tick();
        let p = mesh.points()[0];
        assert_eq!(p.vx, -0.13);
        assert_eq!(p.vy, 0.07);
    }

    #[test]
    fn test_resize_keeps_points_and_next_tick_clamps() {
        let mut mesh = single([400.0, 400.0], point(350.0, 300.0, -0.1, 0.1));
        mesh.resize([200.0, 200.0]);
        assert_eq!(mesh.points()[0].x, 350.0);
        mesh.tick();
        assert_in_bounds(&mesh);
        // Moving inward on x, so no flip there
        assert!(mesh.points()[0].vx < 0.0);
        // Moving outward on y, flipped
        assert!(mesh.points()[0].vy < 0.0);
    }

    #[test]
    fn test_resize_ignores_empty_surface() {
        let mut mesh = single([400.0, 300.0], point(10.0, 10.0, 0.0, 0.0));
        mesh.resize([0.0, 0.0]);
        assert_eq!(mesh.size(), [400.0, 300.0]);
    }

    #[test]
    fn test_packet_progress_phase() {
        // 0*7 + 1*13 = 13, 13 mod 3 = 1 -> phase 1/3, visible
        let t = packet_progress(0, 1, 0.0).expect("visible");
        assert!((t - 2.0 / 3.0).abs() < 1e-6);
        // 14 mod 3 = 2 -> phase 2/3, hidden
        assert_eq!(packet_progress(0, 1, 1.0), None);
        // 15 mod 3 = 0 -> start of the link
        assert_eq!(packet_progress(0, 1, 2.0), Some(0.0));
    }

    #[test]
    fn test_render_link_opacity_falls_off_linearly() {
        let mut mesh = Mesh::new(MeshConfig::default());
        mesh.set_points(
            [500.0, 500.0],
            vec![point(0.0, 0.0, 0.0, 0.0), point(75.0, 0.0, 0.0, 0.0)],
        );
        let mut rec = Recorder::default();
        mesh.render(1.0, &mut rec);
        let link = rec
            .calls
            .iter()
            .find_map(|c| match c {
                Call::Link(_, _, o) => Some(*o),
                _ => None,
            })
            .expect("one link");
        assert!((link - 0.075).abs() < 1e-6);
    }

    #[test]
    fn test_render_skips_distant_pairs() {
        let mut mesh = Mesh::new(MeshConfig::default());
        mesh.set_points(
            [500.0, 500.0],
            vec![point(0.0, 0.0, 0.0, 0.0), point(150.0, 0.0, 0.0, 0.0)],
        );
        let mut rec = Recorder::default();
        let stats = mesh.render(0.0, &mut rec);
        assert_eq!(stats.links, 0);
        assert_eq!(stats.packets, 0);
        assert_eq!(stats.nodes, 2);
    }

    #[test]
    fn test_render_order_and_packet_position() {
        let mut mesh = Mesh::new(MeshConfig::default());
        mesh.set_points(
            [500.0, 500.0],
            vec![point(0.0, 0.0, 0.0, 0.0), point(90.0, 0.0, 0.0, 0.0)],
        );
        let mut rec = Recorder::default();
        // Pair (0, 1) at t=0: progress 2/3
        let stats = mesh.render(0.0, &mut rec);
        assert_eq!(stats, RenderStats { links: 1, packets: 1, nodes: 2 });
        assert_eq!(rec.calls[0], Call::Clear);
        assert!(matches!(rec.calls[1], Call::Link(..)));
        match rec.calls[2] {
            Call::Packet([x, y]) => {
                assert!((x - 60.0).abs() < 1e-3);
                assert_eq!(y, 0.0);
            }
            ref other => panic!("expected packet, got {:?}", other),
        }
        assert!(matches!(rec.calls[3], Call::Node(..)));
        assert!(matches!(rec.calls[4], Call::Node(..)));
    }

    #[test]
    fn test_no_packet_beyond_packet_ratio() {
        let mut mesh = Mesh::new(MeshConfig::default());
        // 120 px: linked (< 150) but not packet-eligible (>= 105)
        mesh.set_points(
            [500.0, 500.0],
            vec![point(0.0, 0.0, 0.0, 0.0), point(120.0, 0.0, 0.0, 0.0)],
        );
        let mut rec = Recorder::default();
        let stats = mesh.render(0.0, &mut rec);
        assert_eq!(stats.links, 1);
        assert_eq!(stats.packets, 0);
    }

    #[test]
    fn test_animator_frame_ticks_and_renders() {
        let mut anim = MeshAnimator::with_rng(MeshConfig::default(), StdRng::seed_from_u64(3));
        let h = anim.mount();
        let mut rec = Recorder::default();
        let next = anim.on_frame(h, Some([640.0, 480.0]), 0.0, &mut rec);
        assert!(next.is_some());
        assert_eq!(rec.calls.first(), Some(&Call::Clear));
        let nodes = rec.calls.iter().filter(|c| matches!(c, Call::Node(_))).count();
        assert_eq!(nodes, 40);
    }

    #[test]
    fn test_animator_waits_for_surface() {
        let mut anim = MeshAnimator::with_rng(MeshConfig::default(), StdRng::seed_from_u64(3));
        let h = anim.mount();
        let mut rec = Recorder::default();
        let next = anim.on_frame(h, None, 0.0, &mut rec).expect("keeps looping");
        assert!(rec.calls.is_empty());
        assert!(!anim.mesh().is_initialized());

        anim.on_frame(next, Some([200.0, 200.0]), 0.0, &mut rec);
        assert!(anim.mesh().is_initialized());
        assert!(!rec.calls.is_empty());
    }

    #[test]
    fn test_animator_no_render_after_unmount() {
        let mut anim = MeshAnimator::with_rng(MeshConfig::default(), StdRng::seed_from_u64(3));
        let h = anim.mount();
        let mut rec = Recorder::default();
        let next = anim.on_frame(h, Some([640.0, 480.0]), 0.0, &mut rec).unwrap();

        anim.unmount();
        let mut after = Recorder::default();
        assert_eq!(anim.on_frame(next, Some([640.0, 480.0]), 0.1, &mut after), None);
        assert!(after.calls.is_empty());
        assert!(!anim.is_mounted());
    }

    #[test]
    fn test_animator_stale_handle_draws_nothing() {
        let mut anim = MeshAnimator::with_rng(MeshConfig::default(), StdRng::seed_from_u64(3));
        let first = anim.mount();
        let mut rec = Recorder::default();
        anim.on_frame(first, Some([640.0, 480.0]), 0.0, &mut rec);
        let mut again = Recorder::default();
        assert_eq!(anim.on_frame(first, Some([640.0, 480.0]), 0.0, &mut again), None);
        assert!(again.calls.is_empty());
    }

    #[test]
    fn test_animator_resize_only_while_mounted() {
        let mut anim = MeshAnimator::with_rng(MeshConfig::default(), StdRng::seed_from_u64(3));
        let h = anim.mount();
        let mut rec = Recorder::default();
        anim.on_frame(h, Some([640.0, 480.0]), 0.0, &mut rec);
        anim.on_resize([320.0, 240.0]);
        assert_eq!(anim.mesh().size(), [320.0, 240.0]);

        anim.unmount();
        anim.on_resize([1000.0, 1000.0]);
        assert_eq!(anim.mesh().size(), [320.0, 240.0]);
    }
}

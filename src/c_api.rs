use crate::simulation::Simulation;

/// Plain-data view of one body for renderers on the other side of the ABI.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct BodySnapshot {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
    pub radius: f64,
    pub color: [u8; 3],
    pub is_reference: bool,
    pub is_static: bool,
    pub has_rings: bool,
    pub trail_len: usize,
}

#[unsafe(no_mangle)]
pub extern "C" fn Orrery_Create() -> *mut Simulation {
    Box::into_raw(Box::new(Simulation::solar_system()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Destroy(handle: *mut Simulation) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_Advance(handle: *mut Simulation) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.advance();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_ResetOrbits(handle: *mut Simulation) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|sim| sim.reset_orbits().is_ok())
}

/// Returns the new lock state, or `false` if the handle is null or the reset failed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_ToggleSunLock(handle: *mut Simulation) -> bool {
    unsafe { handle.as_mut() }
        .and_then(|sim| sim.toggle_reference_lock().ok())
        .unwrap_or(false)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_ToggleRelativity(handle: *mut Simulation) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|sim| sim.toggle_relativity())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_ToggleInteractions(handle: *mut Simulation) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|sim| sim.toggle_pairwise_interactions())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_SetGravity(handle: *mut Simulation, g: f64) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|sim| sim.set_gravitational_constant(g).is_ok())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_SetTimeScale(handle: *mut Simulation, time_scale: f64) -> bool {
    unsafe { handle.as_mut() }.is_some_and(|sim| sim.set_time_scale(time_scale).is_ok())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_GetBodyCount(handle: *const Simulation) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.bodies().len())
}

/// Copies body `index` into `out`. Returns `false` if anything is out of range or null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_GetBody(
    handle: *const Simulation,
    index: usize,
    out: *mut BodySnapshot,
) -> bool {
    let (Some(sim), Some(out)) = (unsafe { handle.as_ref() }, unsafe { out.as_mut() }) else {
        return false;
    };
    let Some(body) = sim.bodies().get(index) else {
        return false;
    };
    *out = BodySnapshot {
        x: body.pos.x,
        y: body.pos.y,
        vx: body.vel.x,
        vy: body.vel.y,
        mass: body.mass(),
        radius: body.radius(),
        color: body.color,
        is_reference: body.is_reference(),
        is_static: body.is_static,
        has_rings: body.has_rings,
        trail_len: body.trail().len(),
    };
    true
}

/// Copies up to `capacity` trail samples of body `index` (oldest first) as
/// interleaved x, y pairs into `out`. Returns the number of samples written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Orrery_GetTrail(
    handle: *const Simulation,
    index: usize,
    out: *mut f64,
    capacity: usize,
) -> usize {
    let Some(body) = unsafe { handle.as_ref() }.and_then(|sim| sim.bodies().get(index)) else {
        return 0;
    };
    let Some(len) = capacity.checked_mul(2) else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }
    let out = unsafe { std::slice::from_raw_parts_mut(out, len) };
    let mut written = 0;
    for (slot, p) in out.chunks_exact_mut(2).zip(body.trail().iter()) {
        slot[0] = p.x;
        slot[1] = p.y;
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trip_through_handle() {
        let handle = Orrery_Create();
        unsafe {
            assert_eq!(Orrery_GetBodyCount(handle), 9);
            let mut snap = BodySnapshot::default();
            assert!(Orrery_GetBody(handle, 0, &mut snap));
            assert!(snap.is_reference && snap.is_static);
            assert!(!Orrery_GetBody(handle, 9, &mut snap));

            assert!(!Orrery_SetGravity(handle, 10.0));
            assert!(Orrery_SetGravity(handle, 1.0));
            assert!(!Orrery_ToggleSunLock(handle));
            assert!(Orrery_GetBody(handle, 0, &mut snap));
            assert!(!snap.is_static);

            Orrery_Advance(handle);
            let mut buf = [0.0; 8];
            assert_eq!(Orrery_GetTrail(handle, 1, buf.as_mut_ptr(), 4), 4);
            assert!(Orrery_GetBody(handle, 1, &mut snap));
            assert!(snap.trail_len >= 4);
            // Mercury starts at (400, 350) heading toward +y.
            assert!(buf[1] > 350.0 && buf[7] > buf[1]);
            Orrery_Destroy(handle);
        }
    }

    #[test]
    fn null_handles_are_ignored() {
        unsafe {
            assert_eq!(Orrery_GetBodyCount(std::ptr::null()), 0);
            assert!(!Orrery_ResetOrbits(std::ptr::null_mut()));
            Orrery_Advance(std::ptr::null_mut());
            Orrery_Destroy(std::ptr::null_mut());
        }
    }

    #[test]
    fn oversized_trail_capacity_writes_nothing() {
        let handle = Orrery_Create();
        unsafe {
            Orrery_Advance(handle);
            let mut buf = [0.0; 2];
            assert_eq!(Orrery_GetTrail(handle, 1, buf.as_mut_ptr(), usize::MAX), 0);
            assert_eq!(buf, [0.0; 2]);
            Orrery_Destroy(handle);
        }
    }
}

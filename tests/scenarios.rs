mod common;

use casement::geometry::{Geometry, Size};
use casement::gesture::Pointer;
use casement::window::WindowState;
use casement::WindowOptions;
use common::{TestEnv, TestResult, SCREEN};

#[test]
fn test_register_clamps_and_marks_main() -> TestResult {
    let mut env = TestEnv::new();

    let a = env.wm.register(
        "owner-1",
        Geometry::new(-50, 0, 800, 600),
        WindowOptions::default(),
    )?;

    assert_eq!(a.geometry(), Geometry::new(0, 0, 800, 600));
    assert!(a.is_main_window());
    assert_eq!(a.z_index(), 1001);
    env.assert_consistent();
    Ok(())
}

#[test]
fn test_main_window_per_owner() -> TestResult {
    let mut env = TestEnv::new();

    let a = env.open("owner-1", 0, 0)?;
    let b = env.open("owner-1", 40, 40)?;
    let c = env.open("owner-2", 80, 80)?;

    assert!(env.wm.get(a).ok_or("a missing")?.is_main_window());
    assert!(!env.wm.get(b).ok_or("b missing")?.is_main_window());
    assert!(env.wm.get(c).ok_or("c missing")?.is_main_window());
    env.assert_consistent();
    Ok(())
}

#[test]
fn test_focus_moves_between_windows() -> TestResult {
    let mut env = TestEnv::new();
    let a = env.open("owner-1", 0, 0)?;
    let b = env.open("owner-1", 40, 40)?;

    env.wm.focus(a)?;
    env.wm.focus(b)?;

    let (wa, wb) = (
        env.wm.get(a).ok_or("a missing")?,
        env.wm.get(b).ok_or("b missing")?,
    );
    assert!(!wa.is_focused());
    assert!(wb.is_focused());
    assert!(wb.z_index() > wa.z_index());
    assert_eq!(env.wm.focused(), Some(b));
    env.assert_consistent();
    Ok(())
}

#[test]
fn test_minimize_keeps_stale_focus_reference() -> TestResult {
    let mut env = TestEnv::new();
    let a = env.open("owner-1", 0, 0)?;
    let b = env.wm.register(
        "owner-2",
        Geometry::new(100, 100, 400, 300),
        WindowOptions::default().without_focus(),
    )?;
    env.wm.focus(a)?;

    env.wm.minimize(a)?;

    let wa = env.wm.get(a).ok_or("a missing")?;
    assert!(!wa.is_focused());
    assert!(wa.is_minimized());
    // The reference still names the minimized window until something else
    // is focused explicitly.
    assert_eq!(env.wm.focused(), Some(a));
    env.assert_consistent();

    env.wm.focus(b.id())?;
    assert_eq!(env.wm.focused(), Some(b.id()));
    assert!(env.wm.get(a).ok_or("a missing")?.is_minimized());
    Ok(())
}

#[test]
fn test_maximized_window_refuses_drag() -> TestResult {
    let mut env = TestEnv::new();
    let a = env.open("owner-1", 200, 100)?;

    env.wm.maximize(a)?;
    assert_eq!(env.geometry(a), Geometry::new(0, 0, 1920, 1080));
    assert_eq!(env.wm.get(a).ok_or("a missing")?.state(), WindowState::Maximized);

    assert!(!env.wm.begin_drag(a, Pointer::new(500, 10))?);
    assert!(!env.wm.update_drag(a, Pointer::new(900, 400))?);
    assert!(!env.wm.end_drag(a)?);
    assert_eq!(env.geometry(a), Geometry::covering(SCREEN));
    env.assert_consistent();
    Ok(())
}

#[test]
fn test_any_maximized_is_immediate() -> TestResult {
    let mut env = TestEnv::new();
    let a = env.open("owner-1", 0, 0)?;
    assert!(!env.wm.any_maximized());

    env.wm.maximize(a)?;
    assert!(env.wm.any_maximized());
    env.wm.restore_maximize(a)?;
    assert!(!env.wm.any_maximized());
    Ok(())
}

#[test]
fn test_container_resize_reclamps_every_window() -> TestResult {
    let mut env = TestEnv::new();
    let a = env.open("owner-1", 1100, 480)?;
    let b = env.open("owner-2", 0, 0)?;
    env.wm.maximize(b)?;
    env.wm.minimize(b)?;

    env.container.set(Size::new(1280, 720));
    env.wm.container_resized();

    assert_eq!(env.geometry(a), Geometry::new(480, 120, 800, 600));
    assert_eq!(env.geometry(b), Geometry::new(0, 0, 1280, 720));
    env.wm.restore(b, true)?;
    assert_eq!(env.geometry(b), Geometry::new(0, 0, 1280, 720));
    env.assert_consistent();
    Ok(())
}

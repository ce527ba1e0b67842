//! Adaptive propagation of an EeV proton through a microgauss field.
//!
//! Propagates one particle for a quarter gyration and compares the final
//! position against the analytic circle.
//!
//! Run with:
//!   cargo run --example helix

use gyroprop::constants::{C_LIGHT, ELEMENTARY_CHARGE, EXA_ELECTRON_VOLT, KILO_PARSEC, MICRO_GAUSS};
use gyroprop::{
    Candidate, ControlMode, Deflection, ParticleState, TableauPreset, UniformMagneticField, Vec3,
};

fn main() {
    let b_mag = MICRO_GAUSS;
    let field = UniformMagneticField::new(Vec3::new(0.0, 0.0, b_mag));

    let energy = EXA_ELECTRON_VOLT;
    let state = ParticleState::new(1, energy, Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0));
    let mut candidate = Candidate::new(state, 10.0 * KILO_PARSEC);

    let driver = Deflection::new(ControlMode::Rms, 1e-6, TableauPreset::CashKarp54)
        .expect("valid configuration");

    // Gyration rate and radius of the analytic circle.
    let omega = ELEMENTARY_CHARGE * C_LIGHT * C_LIGHT * b_mag / energy;
    let r_l = C_LIGHT / omega;

    println!("1 EeV proton in a {:.1} uG field", b_mag / MICRO_GAUSS);
    println!("  gyroradius: {:.3} kpc", r_l / KILO_PARSEC);
    println!();
    println!("  step   path [kpc]   step [kpc]   direction");

    let quarter_turn = std::f64::consts::FRAC_PI_2 / omega * C_LIGHT; // path length, m
    let mut path = 0.0;
    let mut steps = 0u32;
    while path < quarter_turn {
        driver.apply(&mut candidate, &field);
        path += candidate.last_step();
        steps += 1;
        let d = candidate.current.direction();
        println!(
            "  {:>4}   {:>10.4}   {:>10.4}   ({:+.4}, {:+.4}, {:+.4})",
            steps,
            path / KILO_PARSEC,
            candidate.last_step() / KILO_PARSEC,
            d.x,
            d.y,
            d.z
        );
    }

    // Analytic position after the travelled path.
    let phase = omega * path / C_LIGHT;
    let exact = Vec3::new(r_l * phase.sin(), r_l * (phase.cos() - 1.0), 0.0);
    let error = (candidate.current.position() - exact).norm();

    println!();
    println!("  travelled {:.4} kpc in {steps} steps", path / KILO_PARSEC);
    println!("  position error vs analytic circle: {:.3e} m ({:.3e} gyroradii)", error, error / r_l);
}

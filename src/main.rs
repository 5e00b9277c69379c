//! Demo program for Conrey character evaluation.
//!
//! Prints character tables, parity/primitivity breakdowns and conductor
//! counts for a handful of moduli, outputting a JSON summary at the end.

use serde::Serialize;

use conrey_characters::complex;
use conrey_characters::gauss;
use conrey_characters::DirichletGroup;

#[derive(Serialize)]
struct GroupReport {
    modulus: u64,
    size: u64,
    q_even: u64,
    q_odd: u64,
    factor_primes: Vec<u64>,
    num_even: u64,
    num_odd: u64,
    num_primitive: u64,
    num_real: u64,
    conductors: Vec<u64>,
}

fn survey(q: u64) -> GroupReport {
    let group = DirichletGroup::new(q).expect("modulus in supported range");

    let mut num_even = 0;
    let mut num_odd = 0;
    let mut num_primitive = 0;
    let mut num_real = 0;
    let mut conductors = Vec::new();

    for chi in group.characters() {
        if chi.is_even() {
            num_even += 1;
        } else {
            num_odd += 1;
        }
        if chi.is_primitive() {
            num_primitive += 1;
        }
        if chi.is_real() {
            num_real += 1;
        }
        conductors.push(gauss::conductor(&chi));
    }

    GroupReport {
        modulus: q,
        size: group.size(),
        q_even: group.q_even(),
        q_odd: group.q_odd(),
        factor_primes: group.factors().iter().map(|f| f.prime).collect(),
        num_even,
        num_odd,
        num_primitive,
        num_real,
        conductors,
    }
}

fn main() {
    println!("========================================");
    println!("  Conrey characters");
    println!("========================================");
    println!();

    // --- Character table for a small modulus ---
    let q = 12u64;
    let group = DirichletGroup::new(q).expect("modulus in supported range");
    println!("--- Character table mod {} ---", q);
    print!("{:>8}", "n \\ m");
    for m in 1..q {
        print!("{:>8}", m);
    }
    println!();
    for chi in group.characters() {
        print!("{:>8}", chi.label());
        for m in 1..q as i64 {
            let v = chi.value(m);
            if complex::cnorm_sq(v) < 1e-20 {
                print!("{:>8}", "0");
            } else if v.1.abs() < 1e-9 {
                print!("{:>8}", format!("{:+.0}", v.0));
            } else {
                print!("{:>8}", format!("{:+.2}{:+.2}i", v.0, v.1));
            }
        }
        println!();
    }
    println!();

    // --- Gauss sums of primitive characters ---
    println!("--- Gauss sums, primitive characters mod 16 ---");
    let group = DirichletGroup::new(16).expect("modulus in supported range");
    for chi in group.primitive_characters() {
        let tau = gauss::gauss_sum(&chi);
        println!(
            "  {}: tau = {:+.4}{:+.4}i, |tau|^2 = {:.4}",
            chi,
            tau.0,
            tau.1,
            complex::cnorm_sq(tau)
        );
    }
    println!();

    // --- Survey across moduli ---
    println!("--- Survey ---");
    let moduli = [1u64, 5, 8, 9, 12, 16, 45, 100, 420];
    let mut reports = Vec::new();
    for &q in &moduli {
        let report = survey(q);
        println!(
            "  q = {:>4}: {:>4} characters, {:>4} primitive, {:>3} real, {:>4} even / {:>4} odd",
            q, report.size, report.num_primitive, report.num_real, report.num_even, report.num_odd
        );
        reports.push(report);
    }

    println!();
    println!("--- JSON Report ---");
    println!(
        "{}",
        serde_json::to_string_pretty(&reports).expect("report serializes")
    );
}

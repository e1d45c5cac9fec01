//! Matrix-Multiply Workload Tests.

use plru_core::config::WorkloadConfig;
use plru_core::sim::MatMul;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn small(n: usize) -> MatMul {
    MatMul::new(&WorkloadConfig {
        matrix_size: n,
        element_bytes: 4,
        a_base: 0x1000,
        b_base: 0x2000,
        c_base: 0x3000,
    })
}

#[test]
fn two_by_two_program_order() {
    let addrs: Vec<u64> = small(2).addresses().take(18).collect();
    assert_eq!(
        addrs,
        vec![
            // C[0][0], then A[0][x], B[x][0], C[0][0] twice for x = 0, 1
            0x3000, 0x1000, 0x2000, 0x3000, 0x3000, 0x1004, 0x2008, 0x3000, 0x3000,
            // C[0][1]
            0x3004, 0x1000, 0x2004, 0x3004, 0x3004, 0x1004, 0x200C, 0x3004, 0x3004,
        ]
    );
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(8)]
fn length_matches_formula(#[case] n: usize) {
    let workload = small(n);
    assert_eq!(workload.addresses().count() as u64, workload.len());
    assert_eq!(workload.is_empty(), n == 0);
}

#[test]
fn stays_within_matrices() {
    let n = 5u64;
    let span = n * n * 4;
    for a in small(5).addresses() {
        let in_a = (0x1000..0x1000 + span).contains(&a);
        let in_b = (0x2000..0x2000 + span).contains(&a);
        let in_c = (0x3000..0x3000 + span).contains(&a);
        assert!(in_a || in_b || in_c, "stray address {a:#x}");
    }
}

/// The last access is the final accumulator write of C[n-1][n-1].
#[test]
fn ends_on_last_result_element() {
    let last = small(4).addresses().last().unwrap();
    assert_eq!(last, 0x3000 + 15 * 4);
}

#[test]
fn default_bases_use_high_addresses() {
    let workload = MatMul::new(&WorkloadConfig {
        matrix_size: 1,
        ..WorkloadConfig::default()
    });
    let addrs: Vec<u64> = workload.addresses().collect();
    assert_eq!(
        addrs,
        vec![
            0xFACE_00C0_0000_0000,
            0xFACE_00A0_0000_0000,
            0xFACE_00B0_0000_0000,
            0xFACE_00C0_0000_0000,
            0xFACE_00C0_0000_0000,
        ]
    );
}

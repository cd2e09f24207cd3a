//! Property-based tests for the circuit model.

use proptest::prelude::*;
use revlay_ir::Circuit;

fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec((0_u8..8).prop_map(|i| format!("v{i}")), 0..24)
}

/// A template over `p0..p2` with 1-4 gates.
fn arb_template() -> impl Strategy<Value = Circuit> {
    prop::collection::vec((0_usize..3, 0_usize..3), 1..=4).prop_map(|pairs| {
        let mut body = Circuit::new("body");
        for name in ["p0", "p1", "p2"] {
            body.register_variable(name);
        }
        for (control, target) in pairs {
            let target = format!("p{target}");
            if control == 0 || format!("p{control}") == target {
                body.not(&target);
            } else {
                body.cnot(&format!("p{control}"), &target).unwrap();
            }
        }
        body
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn registry_keeps_first_use_order(names in arb_names()) {
        let mut circuit = Circuit::new("top");
        for name in &names {
            circuit.register_variable(name);
        }

        let mut expected: Vec<String> = Vec::new();
        for name in names {
            if !expected.contains(&name) {
                expected.push(name);
            }
        }
        prop_assert_eq!(circuit.initial_order(), expected.as_slice());
    }

    #[test]
    fn flattening_counts_every_gate(
        template in arb_template(),
        top_gates in 0_usize..6,
        instances in 0_usize..4,
    ) {
        let per_instance = template.num_gates();
        let mut circuit = Circuit::new("top");
        circuit.add_template("body", template).unwrap();
        for i in 0..top_gates.max(instances) {
            if i < top_gates {
                circuit.not(&format!("x{i}"));
            }
            if i < instances {
                circuit
                    .instantiate("body", vec!["a".into(), "b".into(), "c".into()])
                    .unwrap();
            }
        }

        let flat = circuit.flattened_gates().unwrap();
        prop_assert_eq!(flat.len(), top_gates + instances * per_instance);
        for gate in &flat {
            prop_assert!(circuit.variables().contains(gate.target()));
        }
    }

    #[test]
    fn installed_ordering_keeps_initial_order(names in arb_names()) {
        let mut circuit = Circuit::new("top");
        for name in &names {
            circuit.register_variable(name);
        }
        let initial = circuit.initial_order().to_vec();
        let mut reversed = initial.clone();
        reversed.reverse();

        circuit.set_ordering(reversed.clone()).unwrap();
        prop_assert_eq!(circuit.ordering(), reversed.as_slice());
        prop_assert_eq!(circuit.initial_order(), initial.as_slice());

        circuit.reset_ordering();
        prop_assert_eq!(circuit.ordering(), initial.as_slice());
    }
}

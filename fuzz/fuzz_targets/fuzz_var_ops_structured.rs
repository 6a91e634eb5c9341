#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tickui_core::{TICK, WidgetExt};
use tickui_runtime::Var;

#[derive(Arbitrary, Debug)]
enum VarOp {
    Change(i16),
    Add(i16),
    Tick,
    Derive,
    DropLast,
}

fuzz_target!(|ops: Vec<VarOp>| {
    let root = Var::new("root", 0i16);
    let mut chain: Vec<Var<i16>> = Vec::new();
    let mut committed = 0i16;
    let mut staged = 0i16;

    for op in ops.into_iter().take(256) {
        match op {
            VarOp::Change(n) => {
                root.change(n);
                staged = n;
            }
            VarOp::Add(n) => {
                root.update(|v| v.wrapping_add(n));
                staged = staged.wrapping_add(n);
            }
            VarOp::Tick => {
                assert!(root.dispatch(&TICK, &()).is_ok());
                committed = staged;
            }
            VarOp::Derive => {
                if chain.len() < 16 {
                    let source = chain.last().unwrap_or(&root);
                    let next = source.derive(|n| n.wrapping_add(1));
                    chain.push(next);
                }
            }
            VarOp::DropLast => {
                chain.pop();
            }
        }

        assert_eq!(root.value(), committed);
        let mut expected = committed;
        for var in &chain {
            expected = expected.wrapping_add(1);
            assert_eq!(var.value(), expected);
        }
    }
});

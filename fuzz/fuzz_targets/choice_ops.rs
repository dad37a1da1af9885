#![no_main]

use choice_dict::{ChoiceDictionary, ImplicitChoiceDictionary};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(u16),
    Remove(u16),
    Contains(u16),
    Choice,
    Clear,
}

fuzz_target!(|data: (u16, Vec<Op>)| {
    let (universe_raw, ops) = data;
    let universe = universe_raw as usize;

    let mut cd = ChoiceDictionary::new(universe);
    let mut oracle = ImplicitChoiceDictionary::new(universe);

    for op in ops {
        match op {
            Op::Insert(x) => assert_eq!(cd.insert(x as usize), oracle.insert(x as usize)),
            Op::Remove(x) => assert_eq!(cd.remove(x as usize), oracle.remove(x as usize)),
            Op::Contains(x) => assert_eq!(cd.contains(x as usize), oracle.contains(x as usize)),
            Op::Choice => match cd.choice() {
                Ok(c) => assert_eq!(oracle.contains(c), Ok(true)),
                Err(e) => assert_eq!(oracle.choice(), Err(e)),
            },
            Op::Clear => {
                cd.clear();
                oracle.clear();
            }
        }
        assert_eq!(cd.len(), oracle.len());
    }

    let listed = cd.iter().count();
    assert_eq!(listed, oracle.len());
    for x in cd.iter() {
        assert_eq!(oracle.contains(x), Ok(true));
    }
});

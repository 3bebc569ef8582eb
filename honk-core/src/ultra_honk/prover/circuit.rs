use ark_bn254::Fr;
use ark_ff::{One, Zero};

use crate::flavor::entities::PrecomputedEntities;

/// Public inputs start right after the reserved zero row.
pub const PUB_INPUTS_OFFSET: usize = 1;

pub const W_L: usize = 0;
pub const W_R: usize = 1;
pub const W_O: usize = 2;
pub const W_4: usize = 3;

/// A wire position in the execution trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub wire: usize,
    pub row: usize,
}

impl Cell {
    pub fn new(wire: usize, row: usize) -> Self {
        Cell { wire, row }
    }
}

/// One trace row: four wire values and the selectors that apply to them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gate {
    pub wires: [Fr; 4],
    pub q_m: Fr,
    pub q_c: Fr,
    pub q_l: Fr,
    pub q_r: Fr,
    pub q_o: Fr,
    pub q_4: Fr,
    pub q_arith: Fr,
    pub q_delta_range: Fr,
}

/// Execution trace plus circuit description, as polynomial tables.
#[derive(Clone, Debug)]
pub struct CircuitTables {
    pub log_n: usize,
    pub pub_inputs_offset: usize,
    pub public_inputs: Vec<Fr>,
    pub precomputed: PrecomputedEntities<Vec<Fr>>,
    pub wires: [Vec<Fr>; 4],
}

impl CircuitTables {
    pub fn circuit_size(&self) -> usize {
        1 << self.log_n
    }
}

/// Minimal trace builder: public inputs first (in `w_r`), then gates, with
/// copy constraints recorded as cycles over cells.
pub struct CircuitBuilder {
    log_n: usize,
    public_inputs: Vec<Fr>,
    gates: Vec<Gate>,
    copy_cycles: Vec<Vec<Cell>>,
}

impl CircuitBuilder {
    pub fn new(log_n: usize) -> Self {
        CircuitBuilder {
            log_n,
            public_inputs: Vec::new(),
            gates: Vec::new(),
            copy_cycles: Vec::new(),
        }
    }

    pub fn add_public_input(&mut self, value: Fr) -> Cell {
        assert!(self.gates.is_empty(), "public inputs must precede gates");
        let row = PUB_INPUTS_OFFSET + self.public_inputs.len();
        self.public_inputs.push(value);
        Cell::new(W_R, row)
    }

    /// Appends a gate and returns its row.
    pub fn add_gate(&mut self, gate: Gate) -> usize {
        let row = PUB_INPUTS_OFFSET + self.public_inputs.len() + self.gates.len();
        self.gates.push(gate);
        row
    }

    pub fn assert_equal(&mut self, a: Cell, b: Cell) {
        let find = |cycles: &[Vec<Cell>], cell: Cell| cycles.iter().position(|c| c.contains(&cell));
        match (find(self.copy_cycles.as_slice(), a), find(self.copy_cycles.as_slice(), b)) {
            (Some(i), Some(j)) if i == j => {}
            (Some(i), Some(j)) => {
                let merged = self.copy_cycles.remove(i.max(j));
                self.copy_cycles[i.min(j)].extend(merged);
            }
            (Some(i), None) => self.copy_cycles[i].push(b),
            (None, Some(j)) => self.copy_cycles[j].push(a),
            (None, None) => self.copy_cycles.push(vec![a, b]),
        }
    }

    pub fn build(self) -> CircuitTables {
        let n = 1 << self.log_n;
        let num_rows = PUB_INPUTS_OFFSET + self.public_inputs.len() + self.gates.len();
        assert!(num_rows < n, "trace needs {num_rows} rows, circuit has {n}");

        let mut wires: [Vec<Fr>; 4] = std::array::from_fn(|_| vec![Fr::zero(); n]);
        let mut precomputed = PrecomputedEntities::<Vec<Fr>>::default();
        for table in precomputed.get_all_mut() {
            *table = vec![Fr::zero(); n];
        }

        for (i, value) in self.public_inputs.iter().enumerate() {
            wires[W_R][PUB_INPUTS_OFFSET + i] = *value;
        }
        let first_gate_row = PUB_INPUTS_OFFSET + self.public_inputs.len();
        for (i, gate) in self.gates.iter().enumerate() {
            let row = first_gate_row + i;
            for (wire, value) in wires.iter_mut().zip(gate.wires) {
                wire[row] = value;
            }
            precomputed.q_m[row] = gate.q_m;
            precomputed.q_c[row] = gate.q_c;
            precomputed.q_l[row] = gate.q_l;
            precomputed.q_r[row] = gate.q_r;
            precomputed.q_o[row] = gate.q_o;
            precomputed.q_4[row] = gate.q_4;
            precomputed.q_arith[row] = gate.q_arith;
            precomputed.q_delta_range[row] = gate.q_delta_range;
        }

        let id = |cell: Cell| Fr::from((cell.wire * n + cell.row) as u64);
        let mut sigmas: [Vec<Fr>; 4] =
            std::array::from_fn(|wire| (0..n).map(|row| id(Cell::new(wire, row))).collect());
        for cycle in &self.copy_cycles {
            let value = wires[cycle[0].wire][cycle[0].row];
            for (j, cell) in cycle.iter().enumerate() {
                assert_eq!(wires[cell.wire][cell.row], value, "copy cycle values differ");
                let next = cycle[(j + 1) % cycle.len()];
                sigmas[cell.wire][cell.row] = id(next);
            }
        }
        // The cell pointing at a public input points to -(row + 1) instead, which
        // leaves exactly the public input delta in the grand product.
        for i in 0..self.public_inputs.len() {
            let public = Cell::new(W_R, PUB_INPUTS_OFFSET + i);
            let predecessor = self
                .copy_cycles
                .iter()
                .find_map(|cycle| {
                    let index = cycle.iter().position(|cell| *cell == public)?;
                    Some(cycle[(index + cycle.len() - 1) % cycle.len()])
                })
                .unwrap_or(public);
            sigmas[predecessor.wire][predecessor.row] = -Fr::from((public.row + 1) as u64);
        }

        let [sigma_1, sigma_2, sigma_3, sigma_4] = sigmas;
        precomputed.sigma_1 = sigma_1;
        precomputed.sigma_2 = sigma_2;
        precomputed.sigma_3 = sigma_3;
        precomputed.sigma_4 = sigma_4;
        let [id_1, id_2, id_3, id_4]: [Vec<Fr>; 4] =
            std::array::from_fn(|wire| (0..n).map(|row| id(Cell::new(wire, row))).collect());
        precomputed.id_1 = id_1;
        precomputed.id_2 = id_2;
        precomputed.id_3 = id_3;
        precomputed.id_4 = id_4;
        precomputed.lagrange_first[0] = Fr::one();
        precomputed.lagrange_last[n - 1] = Fr::one();

        CircuitTables {
            log_n: self.log_n,
            pub_inputs_offset: PUB_INPUTS_OFFSET,
            public_inputs: self.public_inputs,
            precomputed,
            wires,
        }
    }
}

fn fr(value: u64) -> Fr {
    Fr::from(value)
}

/// A small circuit exercising every relation: a multiplication, two
/// additions consuming the public inputs `7` and `2`, and a delta-range
/// chain `6, 7, 9, 12, 13, 15, 18`.
pub fn example_circuit(log_n: usize) -> CircuitTables {
    let one = Fr::one();
    let mut builder = CircuitBuilder::new(log_n);
    let x0 = builder.add_public_input(fr(7));
    let x1 = builder.add_public_input(fr(2));

    // 3 * 5 = 15
    let mul = builder.add_gate(Gate {
        wires: [fr(3), fr(5), fr(15), fr(0)],
        q_m: one,
        q_o: -one,
        q_arith: one,
        ..Default::default()
    });
    // 15 + x0 = 22
    let add = builder.add_gate(Gate {
        wires: [fr(15), fr(7), fr(22), fr(0)],
        q_l: one,
        q_r: one,
        q_o: -one,
        q_arith: one,
        ..Default::default()
    });
    // 22 + x1 + 6 = 30
    let sum = builder.add_gate(Gate {
        wires: [fr(22), fr(2), fr(0), fr(6)],
        q_l: one,
        q_r: one,
        q_4: one,
        q_c: -fr(30),
        q_arith: one,
        ..Default::default()
    });
    let range_0 = builder.add_gate(Gate {
        wires: [fr(6), fr(7), fr(9), fr(12)],
        q_delta_range: one,
        ..Default::default()
    });
    let range_1 = builder.add_gate(Gate {
        wires: [fr(12), fr(13), fr(15), fr(18)],
        q_delta_range: one,
        ..Default::default()
    });
    // w_l = 18
    let end = builder.add_gate(Gate {
        wires: [fr(18), fr(0), fr(0), fr(0)],
        q_l: one,
        q_c: -fr(18),
        q_arith: one,
        ..Default::default()
    });

    builder.assert_equal(Cell::new(W_O, mul), Cell::new(W_L, add));
    builder.assert_equal(x0, Cell::new(W_R, add));
    builder.assert_equal(Cell::new(W_O, add), Cell::new(W_L, sum));
    builder.assert_equal(x1, Cell::new(W_R, sum));
    builder.assert_equal(Cell::new(W_4, sum), Cell::new(W_L, range_0));
    builder.assert_equal(Cell::new(W_4, range_0), Cell::new(W_L, range_1));
    builder.assert_equal(Cell::new(W_4, range_1), Cell::new(W_L, end));
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_layout() {
        let circuit = example_circuit(4);
        assert_eq!(circuit.circuit_size(), 16);
        assert_eq!(circuit.public_inputs, vec![fr(7), fr(2)]);
        assert_eq!(circuit.wires[W_R][1], fr(7));
        // shiftable tables vanish on row 0
        assert!(circuit.wires.iter().all(|wire| wire[0].is_zero()));
        assert_eq!(circuit.precomputed.lagrange_last[15], Fr::one());
    }

    #[test]
    fn public_input_predecessor_gets_negative_index() {
        let circuit = example_circuit(4);
        // x0 at row 1 is copied to w_r of row 4, whose sigma points back at it
        assert_eq!(circuit.precomputed.sigma_2[4], -fr(2));
        assert_eq!(circuit.precomputed.sigma_2[1], fr(16 + 4));
    }

    #[test]
    fn merged_cycles() {
        let mut builder = CircuitBuilder::new(4);
        let value = Gate {
            wires: [fr(1); 4],
            ..Default::default()
        };
        let a = builder.add_gate(value);
        let b = builder.add_gate(value);
        builder.assert_equal(Cell::new(W_L, a), Cell::new(W_R, a));
        builder.assert_equal(Cell::new(W_O, b), Cell::new(W_4, b));
        builder.assert_equal(Cell::new(W_R, a), Cell::new(W_O, b));
        assert_eq!(builder.copy_cycles.len(), 1);
        assert_eq!(builder.copy_cycles[0].len(), 4);
    }
}

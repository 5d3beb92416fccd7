use super::atom::Atom;

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    pub id: char,                // Chain identifier (e.g., 'A', 'B')
    pub(crate) atoms: Vec<Atom>, // Atom records in file order
}

impl Chain {
    pub(crate) fn new(id: char) -> Self {
        Self {
            id,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn atom(serial: usize, name: &str, residue_number: isize) -> Atom {
        Atom::new(serial, name, "ALA", 'A', residue_number, Point3::origin())
    }

    #[test]
    fn new_chain_is_empty() {
        let chain = Chain::new('B');
        assert_eq!(chain.id, 'B');
        assert!(chain.atoms().is_empty());
    }

    #[test]
    fn push_keeps_file_order() {
        let mut chain = Chain::new('A');
        chain.push(atom(2, "CA", 1));
        chain.push(atom(1, "N", 1));
        let serials: Vec<_> = chain.atoms().iter().map(|a| a.serial).collect();
        assert_eq!(serials, vec![2, 1]);
    }
}

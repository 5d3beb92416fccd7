use super::atom::Atom;
use super::chain::Chain;

/// One coordinate set of a structure (a `MODEL` block, or the whole file when
/// the file has no `MODEL` records).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// Serial from the `MODEL` record, `None` for an implicit model.
    pub serial: Option<usize>,
    chains: Vec<Chain>,
}

impl Model {
    pub fn new(serial: Option<usize>) -> Self {
        Self {
            serial,
            chains: Vec::new(),
        }
    }

    /// Appends an atom to the chain carrying its chain id.
    ///
    /// Atoms of a chain id that reappears later in the model (e.g. waters after
    /// a `TER`) join the chain created by its first appearance.
    pub fn add_atom(&mut self, atom: Atom) {
        match self.chains.iter_mut().find(|c| c.id == atom.chain_id) {
            Some(chain) => chain.push(atom),
            None => {
                let mut chain = Chain::new(atom.chain_id);
                chain.push(atom);
                self.chains.push(chain);
            }
        }
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, id: char) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(|c| c.atoms.len()).sum()
    }
}

/// Coordinates of a PDB entry, grouped by model and chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Structure {
    models: Vec<Model>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a single-model structure holding only `chain`.
    pub fn from_chain(chain: Chain) -> Self {
        let mut model = Model::new(None);
        model.chains.push(chain);
        Self {
            models: vec![model],
        }
    }

    pub fn push_model(&mut self, model: Model) {
        self.models.push(model);
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn first_model(&self) -> Option<&Model> {
        self.models.first()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn atom_count(&self) -> usize {
        self.models.iter().map(Model::atom_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn atom(serial: usize, chain_id: char) -> Atom {
        Atom::new(serial, "CA", "GLY", chain_id, serial as isize, Point3::origin())
    }

    #[test]
    fn add_atom_groups_by_chain_id_in_order_of_first_appearance() {
        let mut model = Model::new(None);
        model.add_atom(atom(1, 'B'));
        model.add_atom(atom(2, 'A'));
        model.add_atom(atom(3, 'B'));

        let ids: Vec<_> = model.chains().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!['B', 'A']);
        assert_eq!(model.chain('B').unwrap().atoms().len(), 2);
        assert_eq!(model.atom_count(), 3);
    }

    #[test]
    fn chain_lookup_is_case_sensitive() {
        let mut model = Model::new(Some(1));
        model.add_atom(atom(1, 'A'));
        assert!(model.chain('A').is_some());
        assert!(model.chain('a').is_none());
    }

    #[test]
    fn from_chain_builds_single_model_structure() {
        let mut model = Model::new(None);
        model.add_atom(atom(1, 'C'));
        let chain = model.chain('C').unwrap().clone();

        let structure = Structure::from_chain(chain);
        assert_eq!(structure.model_count(), 1);
        assert_eq!(structure.first_model().unwrap().chains().len(), 1);
        assert_eq!(structure.atom_count(), 1);
    }

    #[test]
    fn empty_structure_has_no_first_model() {
        let structure = Structure::new();
        assert!(structure.first_model().is_none());
        assert_eq!(structure.atom_count(), 0);
    }
}

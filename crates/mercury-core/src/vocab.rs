//! IRI constants for the vocabularies Mercury reads and writes.
//!
//! Constants are grouped by vocabulary:
//! - `rdf` - http://www.w3.org/1999/02/22-rdf-syntax-ns#
//! - `rdfs` - http://www.w3.org/2000/01/rdf-schema#
//! - `xsd` - http://www.w3.org/2001/XMLSchema#
//! - `sh` - SHACL shapes (http://www.w3.org/ns/shacl#)
//! - `dash` - DASH data shapes (http://datashapes.org/dash#)
//! - `fs` - the Fairspace ontology (http://fairspace.io/ontology#)
//! - `jsonld` - JSON-LD keywords

/// JSON-LD keywords.
pub mod jsonld {
    pub const ID: &str = "@id";
    pub const TYPE: &str = "@type";
    pub const VALUE: &str = "@value";
    pub const LIST: &str = "@list";
}

/// RDF vocabulary constants
pub mod rdf {
    /// rdf:nil IRI, also the "explicitly cleared" marker for a predicate
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// RDFS vocabulary constants
pub mod rdfs {
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";

    /// rdfs:Resource, the class of "any IRI"
    pub const RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";
}

/// XSD datatype constants
pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";
}

/// SHACL constants
pub mod sh {
    pub const NODE_SHAPE: &str = "http://www.w3.org/ns/shacl#NodeShape";
    pub const PROPERTY_SHAPE: &str = "http://www.w3.org/ns/shacl#PropertyShape";
    pub const TARGET_CLASS: &str = "http://www.w3.org/ns/shacl#targetClass";
    pub const PROPERTY: &str = "http://www.w3.org/ns/shacl#property";
    pub const PATH: &str = "http://www.w3.org/ns/shacl#path";
    pub const NAME: &str = "http://www.w3.org/ns/shacl#name";
    pub const DESCRIPTION: &str = "http://www.w3.org/ns/shacl#description";
    pub const DATATYPE: &str = "http://www.w3.org/ns/shacl#datatype";
    pub const CLASS: &str = "http://www.w3.org/ns/shacl#class";
    pub const MIN_COUNT: &str = "http://www.w3.org/ns/shacl#minCount";
    pub const MAX_COUNT: &str = "http://www.w3.org/ns/shacl#maxCount";
    pub const IN: &str = "http://www.w3.org/ns/shacl#in";
    pub const NODE: &str = "http://www.w3.org/ns/shacl#node";
}

/// DASH constants
pub mod dash {
    /// Shape marking a property whose values form an ordered `rdf:List`
    pub const LIST_SHAPE: &str = "http://datashapes.org/dash#ListShape";
}

/// Fairspace ontology constants
pub mod fs {
    pub const MACHINE_ONLY: &str = "http://fairspace.io/ontology#machineOnly";
    pub const RELATION_SHAPE: &str = "http://fairspace.io/ontology#RelationShape";
    pub const DATE_DELETED: &str = "http://fairspace.io/ontology#dateDeleted";

    pub const COLLECTION: &str = "http://fairspace.io/ontology#Collection";
    pub const DIRECTORY: &str = "http://fairspace.io/ontology#Directory";
    pub const FILE: &str = "http://fairspace.io/ontology#File";
}

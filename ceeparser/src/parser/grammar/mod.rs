pub(super) mod declaration;
pub(super) mod declarator;
pub(super) mod specifier;
pub(super) mod statement;
pub(super) mod translation_unit;

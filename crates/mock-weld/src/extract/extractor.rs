//! Interface extraction
//!
//! Scans every search location, keeps the interface declarations that pass
//! the name filter, and turns them into `Interface` descriptors ready for
//! generation. The first problem found aborts the whole run.

use std::collections::HashSet;

use crate::error::ExtractError;
use crate::extract::loader::PackageLoader;
use crate::extract::registry::{Candidate, CandidateRegistry};
use crate::ir::{is_exported, Instantiation, Interface, Method, MethodSig, TypeDescriptor};

/// Name filters and generic instantiations for an extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Keep only these names (case-insensitive); empty keeps everything
    pub interfaces: Vec<String>,
    /// Drop these names (case-insensitive)
    pub exclude: Vec<String>,
    /// Concrete type arguments for generic interfaces
    pub instantiations: Vec<Instantiation>,
}

impl ExtractOptions {
    /// Whether `name` passes the allow and deny lists
    pub fn retains(&self, name: &str) -> bool {
        let allowed = self.interfaces.is_empty()
            || self.interfaces.iter().any(|i| i.eq_ignore_ascii_case(name));
        let denied = self.exclude.iter().any(|e| e.eq_ignore_ascii_case(name));
        allowed && !denied
    }

    fn explicitly_requested(&self, name: &str) -> bool {
        self.interfaces.iter().any(|i| i.eq_ignore_ascii_case(name))
    }
}

/// Extracts interfaces through a package loader
pub struct Extractor<'a, L: PackageLoader + ?Sized> {
    loader: &'a L,
    options: &'a ExtractOptions,
}

impl<'a, L: PackageLoader + ?Sized> Extractor<'a, L> {
    pub fn new(loader: &'a L, options: &'a ExtractOptions) -> Self {
        Self { loader, options }
    }

    /// Extract the interfaces found in `locations`, ordered by name
    pub fn extract(&self, locations: &[String]) -> Result<Vec<Interface>, ExtractError> {
        let registry = self.scan(locations)?;

        for requested in &self.options.interfaces {
            if !registry.contains_ignore_case(requested) {
                return Err(ExtractError::NotFound(requested.clone()));
            }
        }

        for inst in &self.options.instantiations {
            if registry.get(&inst.interface).is_empty() {
                return Err(ExtractError::Instantiation {
                    interface: inst.interface.clone(),
                    reason: "no such interface in supplied import paths".to_string(),
                });
            }
        }

        let mut interfaces = Vec::with_capacity(registry.len());
        for name in registry.names() {
            if let Some(locations) = registry.ambiguity(name) {
                return Err(ExtractError::MultiplyDefined {
                    name: name.to_string(),
                    locations,
                });
            }

            if let Some(candidate) = registry.get(name).first() {
                if let Some(iface) = self.build_interface(candidate)? {
                    tracing::debug!(
                        "Extracted interface {}.{} ({} methods)",
                        iface.module,
                        iface.name,
                        iface.methods.len()
                    );
                    interfaces.push(iface);
                }
            }
        }

        if interfaces.is_empty() {
            return Err(ExtractError::NoInterfaces);
        }

        Ok(interfaces)
    }

    /// Load every location and register the retained interface declarations
    fn scan(&self, locations: &[String]) -> Result<CandidateRegistry, ExtractError> {
        let mut registry = CandidateRegistry::new();
        let mut empty_locations = Vec::new();

        for location in locations {
            let package = self.loader.load(location)?;
            package
                .validate()
                .map_err(|source| ExtractError::InvalidPackage {
                    location: location.clone(),
                    source,
                })?;

            let mut retained = 0usize;
            for decl in package.interfaces() {
                if self.options.retains(&decl.name) {
                    registry.register(&package.path, decl);
                    retained += 1;
                }
            }

            tracing::info!(
                "Scanned {} ({}): {} interface(s) retained",
                location,
                package.path,
                retained
            );

            if retained == 0 {
                empty_locations.push(location.clone());
            }
        }

        if locations.len() == 1 && !empty_locations.is_empty() {
            return Err(ExtractError::EmptyLocation(empty_locations.remove(0)));
        }
        if registry.is_empty() {
            return Err(ExtractError::NoInterfaces);
        }
        for location in &empty_locations {
            tracing::warn!("No interfaces retained from {}", location);
        }

        Ok(registry)
    }

    /// Convert a candidate into an interface. Returns `None` for generic
    /// interfaces nobody asked to instantiate.
    fn build_interface(&self, candidate: &Candidate) -> Result<Option<Interface>, ExtractError> {
        let decl = &candidate.declaration;
        let methods = decl.capability_set().unwrap_or(&[]);
        let instantiation = self
            .options
            .instantiations
            .iter()
            .find(|i| i.interface == decl.name);

        let (methods, type_args) = match (decl.is_generic(), instantiation) {
            (false, None) => (methods.to_vec(), Vec::new()),
            (false, Some(_)) => {
                return Err(ExtractError::Instantiation {
                    interface: decl.name.clone(),
                    reason: "interface is not generic".to_string(),
                });
            }
            (true, None) => {
                if self.options.explicitly_requested(&decl.name) {
                    return Err(ExtractError::Instantiation {
                        interface: decl.name.clone(),
                        reason: "generic interface requires type arguments".to_string(),
                    });
                }
                tracing::debug!(
                    "Skipping generic interface {} without an instantiation",
                    decl.name
                );
                return Ok(None);
            }
            (true, Some(inst)) => {
                if inst.type_args.len() != decl.type_params.len() {
                    return Err(ExtractError::Instantiation {
                        interface: decl.name.clone(),
                        reason: format!(
                            "expected {} type argument(s), got {}",
                            decl.type_params.len(),
                            inst.type_args.len()
                        ),
                    });
                }
                let bindings: Vec<(String, TypeDescriptor)> = decl
                    .type_params
                    .iter()
                    .cloned()
                    .zip(inst.type_args.iter().cloned())
                    .collect();
                let bound = methods
                    .iter()
                    .map(|m| MethodSig {
                        name: m.name.clone(),
                        signature: m.signature.substitute(&bindings),
                    })
                    .collect();
                (bound, inst.type_args.clone())
            }
        };

        let mut iface = Interface::new(&decl.name, &candidate.module).type_args(type_args);
        let mut seen = HashSet::new();
        for sig in &methods {
            check_method(&decl.name, sig, &mut seen)?;
            iface.methods.push(Method::from_signature(&sig.name, &sig.signature));
        }
        iface.sort_methods();

        Ok(Some(iface))
    }
}

fn check_method<'s>(
    interface: &str,
    sig: &'s MethodSig,
    seen: &mut HashSet<&'s str>,
) -> Result<(), ExtractError> {
    if !is_exported(&sig.name) {
        return Err(ExtractError::UnexportedMethod {
            interface: interface.to_string(),
            method: sig.name.clone(),
        });
    }

    if !seen.insert(sig.name.as_str()) {
        return Err(ExtractError::DuplicateMethod {
            interface: interface.to_string(),
            method: sig.name.clone(),
        });
    }

    if sig.signature.variadic
        && !sig
            .signature
            .params
            .last()
            .is_some_and(|p| p.ty.is_slice())
    {
        return Err(ExtractError::BadVariadic {
            interface: interface.to_string(),
            method: sig.name.clone(),
        });
    }

    Ok(())
}

/// Extract interfaces from `locations` with `loader`
pub fn extract_interfaces<L: PackageLoader + ?Sized>(
    loader: &L,
    locations: &[String],
    options: &ExtractOptions,
) -> Result<Vec<Interface>, ExtractError> {
    Extractor::new(loader, options).extract(locations)
}

//! Hand-written v1alpha1 adapter methods.
//!
//! The generator splices these into the v1alpha1 adapters wherever the
//! v1alpha1 schema cannot satisfy a v1beta1 trait method field-for-field.
//! Getters only pick a location; they never move or create data.
//! This file is not compiled on its own, so every path is absolute.

impl V1alpha1ConfigurationSpec<'_> {
    fn get_template(&mut self) -> Box<dyn crate::generic::RevisionTemplateSpec + '_> {
        Box::new(V1alpha1RevisionTemplateSpec(resolve_template(self.0)))
    }
}

impl V1alpha1ServiceSpec<'_> {
    fn get_template(&mut self) -> Box<dyn crate::generic::RevisionTemplateSpec + '_> {
        Box::new(V1alpha1RevisionTemplateSpec(resolve_service_template(self.0)))
    }
}

impl V1alpha1RevisionSpec<'_> {
    fn get_containers(&self) -> &[crate::schema::k8s::Container] {
        if self.0.containers.is_empty() {
            self.0.deprecated_container.as_slice()
        } else {
            &self.0.containers
        }
    }

    fn set_containers(&mut self, o: Vec<crate::schema::k8s::Container>) {
        self.0.deprecated_container = None;
        self.0.containers = o;
    }
}

impl V1alpha1RouteStatus<'_> {
    fn get_url(&self) -> Option<&str> {
        self.0.route_status_fields.domain.as_deref()
    }

    fn set_url(&mut self, o: Option<String>) {
        self.0.route_status_fields.domain = o;
    }

    fn get_address(&self) -> Option<&crate::schema::duck::v1beta1::Addressable> {
        self.0.route_status_fields.address.as_ref().map(|a| &a.addressable)
    }

    fn set_address(&mut self, o: Option<crate::schema::duck::v1beta1::Addressable>) {
        self.0.route_status_fields.address = o.map(crate::schema::duck::v1alpha1::Addressable::from);
    }
}

impl V1alpha1ServiceStatus<'_> {
    fn get_url(&self) -> Option<&str> {
        self.0.route_status_fields.domain.as_deref()
    }

    fn set_url(&mut self, o: Option<String>) {
        self.0.route_status_fields.domain = o;
    }

    fn get_address(&self) -> Option<&crate::schema::duck::v1beta1::Addressable> {
        self.0.route_status_fields.address.as_ref().map(|a| &a.addressable)
    }

    fn set_address(&mut self, o: Option<crate::schema::duck::v1beta1::Addressable>) {
        self.0.route_status_fields.address = o.map(crate::schema::duck::v1alpha1::Addressable::from);
    }
}

impl V1alpha1TrafficTargetSlice<'_> {
    fn upsert(
        &mut self,
        tag: Option<String>,
        revision_name: Option<String>,
        configuration_name: Option<String>,
        latest_revision: Option<bool>,
        percent: Option<i64>,
        url: Option<String>,
    ) -> Box<dyn crate::generic::TrafficTarget + '_> {
        let found = crate::generic::TrafficTargetSlice::index(self, tag.as_deref(), revision_name.as_deref());
        let elt = crate::schema::v1alpha1::TrafficTarget {
            deprecated_name: None,
            revision_name,
            tag,
            configuration_name,
            latest_revision,
            percent,
            url,
        };
        let i = match found {
            Some(i) => {
                self.0[i] = elt;
                i
            }
            None => {
                self.0.push(elt);
                self.0.len() - 1
            }
        };
        crate::generic::TrafficTargetSlice::get(self, i)
    }
}

/// The deprecated template when present, else the current one.
fn resolve_template(
    spec: &mut crate::schema::v1alpha1::ConfigurationSpec,
) -> &mut crate::schema::v1alpha1::RevisionTemplateSpec {
    match spec.deprecated_revision_template.as_mut() {
        Some(template) => template,
        None => &mut spec.template,
    }
}

/// `run_latest`, `pinned` and `release` are checked in that order before the
/// inline configuration.
fn resolve_service_template(
    spec: &mut crate::schema::v1alpha1::ServiceSpec,
) -> &mut crate::schema::v1alpha1::RevisionTemplateSpec {
    let legacy = spec
        .deprecated_run_latest
        .as_mut()
        .map(|run_latest| &mut run_latest.configuration)
        .or(spec.deprecated_pinned.as_mut().map(|pinned| &mut pinned.configuration))
        .or(spec.deprecated_release.as_mut().map(|release| &mut release.configuration));
    match legacy {
        Some(configuration) => resolve_template(configuration),
        None => resolve_template(&mut spec.configuration_spec),
    }
}

#[cfg(test)]
pub mod test {
    use crate::config::Config;
    use crate::env::EnvFormat;
    use crate::format::Format;
    use crate::json::JsonFormat;
    use crate::node::{Section, Variable, Vector};
    use crate::registry::Registrar;
    use crate::toml_doc::TomlFormat;

    /// Flat root config. Env names are absolute; document formats nest
    /// under the group path.
    pub struct VarsConfig {
        pub section: Section,
        pub int_var: Variable<i32>,
        pub double_var: Variable<f64>,
        pub str_var: Variable<String>,
        pub longint_var: Variable<i64>,
        pub optional_int_var: Variable<i32>,
    }

    impl Default for VarsConfig {
        fn default() -> Self {
            Self {
                section: Section::mandatory(),
                int_var: Variable::new(),
                double_var: Variable::new(),
                str_var: Variable::new(),
                longint_var: Variable::new(),
                optional_int_var: Variable::with_default(111),
            }
        }
    }

    impl Config for VarsConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.int_var)
                .at::<EnvFormat>("INT")
                .at::<JsonFormat>(format!("{path}/int"))
                .at::<TomlFormat>(format!("{path}.int"));
            r.field(&mut self.double_var)
                .at::<EnvFormat>("DOUBLE")
                .at::<JsonFormat>(format!("{path}/double"))
                .at::<TomlFormat>(format!("{path}.double"));
            r.field(&mut self.str_var)
                .at::<EnvFormat>("STRING")
                .at::<JsonFormat>(format!("{path}/string"))
                .at::<TomlFormat>(format!("{path}.string"));
            r.field(&mut self.longint_var)
                .at::<EnvFormat>("LONGINT")
                .at::<JsonFormat>(format!("{path}/longint"))
                .at::<TomlFormat>(format!("{path}.longint"));
            r.field(&mut self.optional_int_var)
                .at::<EnvFormat>("OPT_INT")
                .at::<JsonFormat>(format!("{path}/opt_int"))
                .at::<TomlFormat>(format!("{path}.opt_int"));
        }
    }

    /// Env-only config with one mandatory and one defaulted value.
    pub struct IntConfig {
        pub section: Section,
        pub int: Variable<i32>,
        pub opt_int: Variable<i32>,
    }

    impl Default for IntConfig {
        fn default() -> Self {
            Self {
                section: Section::mandatory(),
                int: Variable::new(),
                opt_int: Variable::with_default(111),
            }
        }
    }

    impl Config for IntConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, _path: &str, r: &mut Registrar<'a, F>) {
            r.register::<EnvFormat, _>("INT", &mut self.int);
            r.register::<EnvFormat, _>("OPT_INT", &mut self.opt_int);
        }
    }

    // -- Nested groups ---------------------------------------------------------

    #[derive(Default)]
    pub struct VarConfig {
        pub section: Section,
        pub int_var: Variable<i32>,
    }

    impl VarConfig {
        pub fn optional() -> Self {
            Self {
                section: Section::optional(),
                ..Self::default()
            }
        }
    }

    impl Config for VarConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.int_var)
                .at::<EnvFormat>(format!("{path}_INT"))
                .at::<JsonFormat>(format!("{path}/int"))
                .at::<TomlFormat>(format!("{path}.int"));
        }
    }

    pub struct OptVarConfig {
        pub section: Section,
        pub int_var: Variable<i32>,
    }

    impl Default for OptVarConfig {
        fn default() -> Self {
            Self {
                section: Section::mandatory(),
                int_var: Variable::with_default(300),
            }
        }
    }

    impl Config for OptVarConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.int_var)
                .at::<EnvFormat>(format!("{path}_INT"))
                .at::<JsonFormat>(format!("{path}/int"))
                .at::<TomlFormat>(format!("{path}.int"));
        }
    }

    pub struct NestedConfig {
        pub section: Section,
        pub var_config: VarConfig,
        pub var_config_opt: VarConfig,
        pub opt_var_config: OptVarConfig,
    }

    impl Default for NestedConfig {
        fn default() -> Self {
            Self {
                section: Section::mandatory(),
                var_config: VarConfig::default(),
                var_config_opt: VarConfig::optional(),
                opt_var_config: OptVarConfig::default(),
            }
        }
    }

    impl Config for NestedConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.var_config)
                .at::<EnvFormat>(format!("{path}_NESTED"))
                .at::<JsonFormat>(format!("{path}/nested"))
                .at::<TomlFormat>(format!("{path}.nested"));
            r.field(&mut self.var_config_opt)
                .at::<EnvFormat>(format!("{path}_OPT_NESTED"))
                .at::<JsonFormat>(format!("{path}/opt_nested"))
                .at::<TomlFormat>(format!("{path}.opt_nested"));
            r.field(&mut self.opt_var_config)
                .at::<EnvFormat>(format!("{path}_NESTED_OPT"))
                .at::<JsonFormat>(format!("{path}/nested_opt"))
                .at::<TomlFormat>(format!("{path}.nested_opt"));
        }
    }

    // -- Sequences -------------------------------------------------------------

    pub struct VectorConfig {
        pub section: Section,
        pub vector: Vector<i32>,
        /// Never registered, so no pass ever touches it.
        pub optional_vector: Vector<i32>,
        pub optional_empty_vector: Vector<i32>,
        pub optional_default_vector: Vector<i32>,
    }

    impl Default for VectorConfig {
        fn default() -> Self {
            Self {
                section: Section::mandatory(),
                vector: Vector::new(),
                optional_vector: Vector::optional(),
                optional_empty_vector: Vector::with_default(Vec::new()),
                optional_default_vector: Vector::with_default(vec![1, 2, 3]),
            }
        }
    }

    impl Config for VectorConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.vector)
                .at::<EnvFormat>("VECTOR")
                .at::<JsonFormat>(format!("{path}/vector"))
                .at::<TomlFormat>(format!("{path}.vector"));
            r.field(&mut self.optional_empty_vector)
                .at::<EnvFormat>("OPT_EMP_VECTOR")
                .at::<JsonFormat>(format!("{path}/opt_emp_vector"))
                .at::<TomlFormat>(format!("{path}.opt_emp_vector"));
            r.field(&mut self.optional_default_vector)
                .at::<EnvFormat>("OPT_DEF_VECTOR")
                .at::<JsonFormat>(format!("{path}/opt_def_vector"))
                .at::<TomlFormat>(format!("{path}.opt_def_vector"));
        }
    }

    pub struct Server {
        pub section: Section,
        pub host: Variable<String>,
        pub port: Variable<u16>,
    }

    impl Default for Server {
        fn default() -> Self {
            Self {
                section: Section::mandatory(),
                host: Variable::new(),
                port: Variable::with_default(8080),
            }
        }
    }

    impl Config for Server {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.host)
                .at::<EnvFormat>(format!("{path}_HOST"))
                .at::<JsonFormat>(format!("{path}/host"))
                .at::<TomlFormat>(format!("{path}.host"));
            r.field(&mut self.port)
                .at::<EnvFormat>(format!("{path}_PORT"))
                .at::<JsonFormat>(format!("{path}/port"))
                .at::<TomlFormat>(format!("{path}.port"));
        }
    }

    #[derive(Default)]
    pub struct ServersConfig {
        pub section: Section,
        pub servers: Vector<Server>,
    }

    impl Config for ServersConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.servers)
                .at::<EnvFormat>(format!("{path}_SERVERS"))
                .at::<JsonFormat>(format!("{path}/servers"))
                .at::<TomlFormat>(format!("{path}.servers"));
        }
    }

    // -- Group validation ------------------------------------------------------

    #[derive(Default)]
    pub struct RangeConfig {
        pub section: Section,
        pub min: Variable<i64>,
        pub max: Variable<i64>,
    }

    impl Config for RangeConfig {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.min)
                .at::<EnvFormat>(format!("{path}_MIN"))
                .at::<JsonFormat>(format!("{path}/min"));
            r.field(&mut self.max)
                .at::<EnvFormat>(format!("{path}_MAX"))
                .at::<JsonFormat>(format!("{path}/max"));
        }

        fn validate(&self) -> Result<(), String> {
            if let (Ok(min), Ok(max)) = (self.min.get(), self.max.get())
                && min > max
            {
                return Err(format!("min {min} is greater than max {max}"));
            }
            Ok(())
        }
    }

    pub struct OuterRange {
        pub section: Section,
        pub range: RangeConfig,
    }

    impl Default for OuterRange {
        fn default() -> Self {
            Self {
                section: Section::mandatory(),
                range: RangeConfig {
                    section: Section::optional(),
                    ..RangeConfig::default()
                },
            }
        }
    }

    impl Config for OuterRange {
        fn section(&self) -> &Section {
            &self.section
        }

        fn section_mut(&mut self) -> &mut Section {
            &mut self.section
        }

        fn init<'a, F: Format>(&'a mut self, path: &str, r: &mut Registrar<'a, F>) {
            r.field(&mut self.range)
                .at::<EnvFormat>(format!("{path}_RANGE"))
                .at::<JsonFormat>(format!("{path}/range"));
        }
    }

    #[test]
    fn fixtures_start_with_defaults() {
        use crate::node::Object;

        let vars = VarsConfig::default();
        assert!(!vars.initialized());
        assert_eq!(vars.optional_int_var.get().unwrap(), &111);

        let nested = NestedConfig::default();
        assert!(nested.var_config_opt.optional());
        assert!(!nested.var_config.optional());

        let vectors = VectorConfig::default();
        assert!(vectors.optional_empty_vector.initialized());
        assert_eq!(vectors.optional_default_vector.len(), 3);
    }
}

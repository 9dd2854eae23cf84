//! Builtin C templates.

use sourcetpl_core::domain::FileRole;

use super::Entry;

const COMMENT: &str = r#"
/*
 * Description:
 *
 * Author: {{FULL_AUTHOR_NAME}}
 * Created at: {{DATE}}
 * Project: {{PROJECT_BIN_NAME}}
 *
 * Copyright (c) {{YEAR}} All rights reserved
 */

"#;

const SINGLE_COMMENT: &str = r#"
/*
 * Description:
 *
 * Author: {{FULL_AUTHOR_NAME}}
 * Created at: {{DATE}}
 * Project: {{FILENAME}}
 *
 * Copyright (c) {{YEAR}} All rights reserved
 */

"#;

const HEADER_GUARD_OPEN: &str = "#ifndef _{{FILENAME_UPPER}}_H\n#define _{{FILENAME_UPPER}}_H     1\n";

const HEADER_GUARD_CLOSE: &str = "\n#endif\n\n";

const MAIN_HEADER: &str = r#"
#include <stdlib.h>
#include <stdio.h>
#include <unistd.h>

#include "{{PROJECT_NAME}}_def.h"
#include "{{PROJECT_NAME}}_struct.h"
#include "{{PROJECT_NAME}}_prt.h"
"#;

const MAIN_SOURCE: &str = r#"
#include "{{PROJECT_NAME}}.h"

int main(int argc, char **argv)
{
    const char *opt = "hv\0";
    int option;

    do {
        option = getopt(argc, argv, opt);

        switch (option) {
            case 'h':
                return 1;

            case 'v':
                return 1;

            case '?':
                return -1;
        }
    } while (option != -1);

    return 0;
}

"#;

const DEF_HEADER: &str = r#"
#define MAJOR_VERSION   0
#define MINOR_VERSION   1
#define RELEASE         1
#define BETA            true
"#;

const PACKAGE_DEF_HEADER: &str = r#"
/*
 * Package version: major, minor and release.
 */
#include "../../package_version.h"

#define BUILD           0
"#;

const LIB_HEADER: &str = r#"
#ifdef {{PROJECT_NAME_UPPER}}_COMPILE
# define MAJOR_VERSION  0
# define MINOR_VERSION  1
# define RELEASE        1
#endif

{{HEADER_FILES}}"#;

const PACKAGE_LIB_HEADER: &str = r#"
/*
 * Package version: major, minor and release.
 */
#include "../../package_version.h"

{{HEADER_FILES}}"#;

const LIB_SYMBOLS: &str = r#"{{PROJECT_NAME_UPPER}}_0.1 {
    global:
        *;
    local:
        *;
};
"#;

const UTILS_SOURCE: &str = r#"
#include "{{PROJECT_NAME}}.h"
"#;

const UTILS_HEADER: &str = "\n";

const ERROR_SOURCE: &str = r#"
#include "{{PROJECT_NAME}}.h"

static const char *__description[] = {
    "Ok",
};

static const char *__unknown_error = "Unknown error";

static __thread enum {{LIB_PREFIX}}_error_code __last_error = {{LIB_PREFIX_UPPER}}_NO_ERROR;

void errno_clear(void)
{
    __last_error = {{LIB_PREFIX_UPPER}}_NO_ERROR;
}

void errno_set(enum {{LIB_PREFIX}}_error_code code)
{
    __last_error = code;
}

enum {{LIB_PREFIX}}_error_code {{LIB_PREFIX}}_get_last_error(void)
{
    return __last_error;
}

const char *{{LIB_PREFIX}}_strerror(enum {{LIB_PREFIX}}_error_code code)
{
    if (code >= {{LIB_PREFIX_UPPER}}_MAX_ERROR_CODE)
        return __unknown_error;

    return __description[code];
}
"#;

const ERROR_HEADER: &str = r#"
enum {{LIB_PREFIX}}_error_code {
    {{LIB_PREFIX_UPPER}}_NO_ERROR,

    {{LIB_PREFIX_UPPER}}_MAX_ERROR_CODE
};

void errno_clear(void);
void errno_set(enum {{LIB_PREFIX}}_error_code code);
enum {{LIB_PREFIX}}_error_code {{LIB_PREFIX}}_get_last_error(void);
const char *{{LIB_PREFIX}}_strerror(enum {{LIB_PREFIX}}_error_code code);
"#;

// Rule appended to packaged Makefiles: regenerates package_version.h from
// package.conf by calling back into source-tpl.
macro_rules! package_version_rule {
    () => {
        r#"
PACKAGE_CONF=package/package.conf
PACKAGE_VERSION_NAME=package_version
PACKAGE_VERSION=../../$(PACKAGE_VERSION_NAME).h
package_version: $(PACKAGE_VERSION)
$(PACKAGE_VERSION):
	$(shell (cd ../../ && source-tpl new $(PACKAGE_VERSION_NAME) -t header -f \
	    -c "^#define MAJOR_VERSION	`cfget -C $(PACKAGE_CONF) version/major`\
	    ^#define MINOR_VERSION	`cfget -C $(PACKAGE_CONF) version/minor` \
	    ^#define RELEASE		`cfget -C $(PACKAGE_CONF) version/release` \
	    ^#define BETA		`cfget -C $(PACKAGE_CONF) version/beta`^"))
"#
    };
}

macro_rules! app_makefile {
    ($phony:literal, $deps:literal) => {
        concat!(
            ".PHONY: outputdirs",
            $phony,
            r#"

CC = {{COMPILER}}

machine = $(shell uname -m)

ifeq ($(machine), x86_64)
    ARCH_DIR = x86_64
else
    ARCH_DIR = i686
endif

OUTPUTDIR = ../bin/$(ARCH_DIR)
TARGET = $(OUTPUTDIR)/{{PROJECT_BIN_NAME}}

INCLUDEDIR = -I../include

CFLAGS = -Wall -Wextra -O0 -ggdb $(INCLUDEDIR)

LIBDIR = -L/usr/local/lib
LIBS =

C_FILES := $(wildcard *.c)
OBJS = $(C_FILES:.c=.o)

$(TARGET): outputdirs "#,
            $deps,
            r#"$(OBJS)
	$(CC) -o $(TARGET) $(OBJS) $(LIBDIR) $(LIBS)

clean:
	rm -rf $(OBJS) $(TARGET) *~ ../include/*~

purge: clean $(TARGET)

outputdirs: $(OUTPUTDIR)
$(OUTPUTDIR):
	mkdir -p $(OUTPUTDIR)
"#
        )
    };
}

macro_rules! lib_makefile {
    ($phony:literal, $version_file:literal, $field:literal, $deps:literal) => {
        concat!(
            ".PHONY: shared static clean dest_clean install outputdirs",
            $phony,
            r#"

CC = {{COMPILER}}
AR = ar

ARCH_TEST := $(shell uname -m)

ifeq ($(ARCH_TEST), x86_64)
    ARCH = x86_64
else
    ARCH = i686
endif

MAJOR_VERSION := $(shell command grep MAJOR_VERSION "#,
            $version_file,
            " | awk '{print $$",
            $field,
            r#"}')
MINOR_VERSION := $(shell command grep MINOR_VERSION "#,
            $version_file,
            " | awk '{print $$",
            $field,
            r#"}')
RELEASE := $(shell command grep RELEASE "#,
            $version_file,
            " | awk '{print $$",
            $field,
            r#"}')

USR_DIR = /usr/local/lib
PREFIX = {{PROJECT_NAME}}
LIBNAME = $(PREFIX).so
SONAME = $(LIBNAME)
SHARED_LIBNAME := $(LIBNAME).$(MAJOR_VERSION).$(MINOR_VERSION).$(RELEASE)
STATIC_LIBNAME := $(PREFIX).a

OUTPUTDIR = ../bin/$(ARCH)
TARGET_SHARED := $(OUTPUTDIR)/$(SHARED_LIBNAME)
TARGET_STATIC := $(OUTPUTDIR)/$(STATIC_LIBNAME)

INCLUDEDIR = -I../include
CFLAGS = -Wall -Wextra -fPIC -ggdb -O0 -g3 -fvisibility=hidden \
        -D{{PROJECT_NAME_UPPER}}_COMPILE -D_GNU_SOURCE $(INCLUDEDIR)

LIBDIR =
LIBS =

VPATH = ../include:.

C_FILES := $(wildcard *.c)
OBJS = $(C_FILES:.c=.o)

shared: outputdirs "#,
            $deps,
            r#"$(OBJS)
	$(CC) -shared -Wl,-soname,$(SONAME),--version-script,$(PREFIX).sym -o $(TARGET_SHARED) $(OBJS) $(LIBDIR) $(LIBS)

static: outputdirs "#,
            $deps,
            r#"$(OBJS)
	$(AR) -sr $(TARGET_STATIC) $(OBJS)

clean:
	rm -rf $(OBJS) $(TARGET_SHARED) $(TARGET_STATIC) *~ ../include/*~

dest_clean:
	rm -f $(USR_DIR)/$(LIBNAME)*

install:
	cp -f $(TARGET_SHARED) $(USR_DIR)
	rm -rf $(USR_DIR)/$(LIBNAME) $(USR_DIR)/$(SONAME)
	ln -s $(USR_DIR)/$(SHARED_LIBNAME) $(USR_DIR)/$(LIBNAME)
	ln -s $(USR_DIR)/$(SHARED_LIBNAME) $(USR_DIR)/$(SONAME)

outputdirs: $(OUTPUTDIR)
$(OUTPUTDIR):
	mkdir -p $(OUTPUTDIR)
"#
        )
    };
}

const APP_MAKEFILE: &str = app_makefile!("", "");

const PACKAGE_APP_MAKEFILE: &str = concat!(
    app_makefile!(" package_version", "package_version "),
    package_version_rule!()
);

const LIB_MAKEFILE: &str = lib_makefile!("", "../include/{{PROJECT_NAME}}.h", "4", "");

const PACKAGE_LIB_MAKEFILE: &str = concat!(
    lib_makefile!(
        " package_version",
        "../../package_version.h",
        "3",
        "package_version "
    ),
    package_version_rule!()
);

const GITIGNORE: &str = r#"# Object files
*.o
*.ko
*.obj
*.elf

# Precompiled Headers
*.gch
*.pch

# Libraries
*.lib
*.a
*.la
*.lo

# Shared objects (inc. Windows DLLs)
*.dll
*.so
*.so.*
*.dylib

# Executables
*.exe
*.out
*.app
*.i*86
*.x86_64
*.hex

# Debug files
*.dSYM/
*.log

"#;

/// `(role, packaged, template)` rows for [`Language::C`](sourcetpl_core::domain::Language::C).
pub(super) const TEMPLATES: &[Entry] = &[
    (FileRole::Comment, false, COMMENT),
    (FileRole::SingleComment, false, SINGLE_COMMENT),
    (FileRole::HeaderGuardOpen, false, HEADER_GUARD_OPEN),
    (FileRole::HeaderGuardClose, false, HEADER_GUARD_CLOSE),
    (FileRole::MainHeader, false, MAIN_HEADER),
    (FileRole::MainSource, false, MAIN_SOURCE),
    (FileRole::DefHeader, false, DEF_HEADER),
    (FileRole::DefHeader, true, PACKAGE_DEF_HEADER),
    (FileRole::LibHeader, false, LIB_HEADER),
    (FileRole::LibHeader, true, PACKAGE_LIB_HEADER),
    (FileRole::LibSymbols, false, LIB_SYMBOLS),
    (FileRole::UtilsSource, false, UTILS_SOURCE),
    (FileRole::UtilsHeader, false, UTILS_HEADER),
    (FileRole::ErrorSource, false, ERROR_SOURCE),
    (FileRole::ErrorHeader, false, ERROR_HEADER),
    (FileRole::AppMakefile, false, APP_MAKEFILE),
    (FileRole::AppMakefile, true, PACKAGE_APP_MAKEFILE),
    (FileRole::LibMakefile, false, LIB_MAKEFILE),
    (FileRole::LibMakefile, true, PACKAGE_LIB_MAKEFILE),
    (FileRole::GitIgnore, false, GITIGNORE),
];
